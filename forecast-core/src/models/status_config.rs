use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::LegalStatus;

/// Flat taxation applied to SASU dividends (and to the EURL dividend
/// tranche under the capital threshold): personal income tax and social
/// levies bundled into a single rate.
pub const DIVIDEND_FLAT_TAX_RATE: Decimal = dec!(0.30);

/// EURL dividends up to this share of the company's capital stay on the
/// flat-tax path; the excess takes social contributions, then income tax.
pub const DIVIDEND_CAPITAL_THRESHOLD_SHARE: Decimal = dec!(0.10);

/// First-year contribution reduction: the social rate is multiplied by
/// this factor, everything else in the formulas is unchanged.
pub const ACRE_SOCIAL_FACTOR: Decimal = dec!(0.50);

/// Rate configuration for one legal status.
///
/// `corporate_tax_rate` is set exactly for the statuses where the
/// remuneration strategy matters (EURL, SASU).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRates {
    pub social_rate: Decimal,
    pub income_tax_rate: Decimal,
    pub corporate_tax_rate: Option<Decimal>,
}

impl LegalStatus {
    /// Fixed rate table, one row per status. Simplified linear rates, not
    /// tax law.
    pub fn rates(&self) -> StatusRates {
        match self {
            Self::MicroEntreprise => StatusRates {
                social_rate: dec!(0.256),
                income_tax_rate: dec!(0.11),
                corporate_tax_rate: None,
            },
            Self::EntrepriseIndividuelle => StatusRates {
                social_rate: dec!(0.45),
                income_tax_rate: dec!(0.11),
                corporate_tax_rate: None,
            },
            Self::Eirl => StatusRates {
                social_rate: dec!(0.45),
                income_tax_rate: dec!(0.11),
                corporate_tax_rate: None,
            },
            Self::PortageSalarial => StatusRates {
                social_rate: dec!(0.51),
                income_tax_rate: dec!(0.11),
                corporate_tax_rate: None,
            },
            Self::Eurl => StatusRates {
                social_rate: dec!(0.45),
                income_tax_rate: dec!(0.11),
                corporate_tax_rate: Some(dec!(0.15)),
            },
            Self::Sasu => StatusRates {
                social_rate: dec!(0.65),
                income_tax_rate: dec!(0.11),
                corporate_tax_rate: Some(dec!(0.15)),
            },
        }
    }

    pub fn bears_corporate_tax(&self) -> bool {
        self.rates().corporate_tax_rate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flat_rate_status_matches_published_rates() {
        let rates = LegalStatus::MicroEntreprise.rates();

        assert_eq!(rates.social_rate, dec!(0.256));
        assert_eq!(rates.income_tax_rate, dec!(0.11));
        assert_eq!(rates.corporate_tax_rate, None);
    }

    #[test]
    fn exactly_two_statuses_bear_corporate_tax() {
        let corporate: Vec<_> = LegalStatus::all()
            .into_iter()
            .filter(LegalStatus::bears_corporate_tax)
            .collect();

        assert_eq!(corporate, vec![LegalStatus::Eurl, LegalStatus::Sasu]);
    }

    #[test]
    fn every_status_has_rates_below_one() {
        for status in LegalStatus::all() {
            let rates = status.rates();
            assert!(rates.social_rate < Decimal::ONE, "{status:?}");
            assert!(rates.income_tax_rate < Decimal::ONE, "{status:?}");
            if let Some(corporate) = rates.corporate_tax_rate {
                assert!(corporate < Decimal::ONE, "{status:?}");
            }
        }
    }
}
