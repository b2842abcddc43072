//! Algebraic inverse of the tax engine.
//!
//! Each net-income branch is a (piecewise) linear function of gross
//! revenue, so the required revenue is the target divided by the branch
//! multiplier, with the matching segment located first where the branch is
//! piecewise. A non-positive multiplier means no revenue reaches the
//! target; that surfaces as an explicit error, never as an infinity.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::calculations::tax::{EffectiveRates, salary_share};
use crate::models::{
    DIVIDEND_CAPITAL_THRESHOLD_SHARE, DIVIDEND_FLAT_TAX_RATE, LegalStatus, Profile,
    RemunerationStrategy,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The combined multiplier is zero or negative: the charges eat the
    /// whole revenue and the target can never be reached.
    #[error("target net income {0} is unreachable with the given rates")]
    UnreachableTarget(Decimal),

    /// A daily rate cannot be derived from zero worked days.
    #[error("worked days per year must be positive")]
    NoWorkedDays,
}

/// Computes the gross revenue and daily rate required for a target net.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use forecast_core::models::Profile;
/// use forecast_core::calculations::solver::ReverseSolver;
///
/// let profile = Profile::default();
/// let solver = ReverseSolver::for_profile(&profile);
///
/// // Flat-rate status keeps 63.4 % of revenue: 38040 / 0.634 = 60000.
/// let revenue = solver.required_revenue(dec!(38040), &profile).unwrap();
/// assert_eq!(revenue, dec!(60000));
///
/// let rate = ReverseSolver::required_daily_rate(revenue, dec!(200)).unwrap();
/// assert_eq!(rate, dec!(300));
/// ```
#[derive(Debug, Clone)]
pub struct ReverseSolver {
    rates: EffectiveRates,
}

impl ReverseSolver {
    pub fn new(rates: EffectiveRates) -> Self {
        Self { rates }
    }

    pub fn for_profile(profile: &Profile) -> Self {
        Self::new(EffectiveRates::resolve(profile))
    }

    /// Same solver with the ACRE reduction substituted into the rates.
    pub fn with_acre(self) -> Self {
        Self::new(self.rates.with_acre())
    }

    /// Gross annual revenue required to reach `target_net`.
    ///
    /// A target of zero or less needs no revenue at all.
    pub fn required_revenue(
        &self,
        target_net: Decimal,
        profile: &Profile,
    ) -> Result<Decimal, SolverError> {
        if target_net <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let revenue = match profile.legal_status {
            LegalStatus::MicroEntreprise => self.invert_linear(
                target_net,
                Decimal::ONE - self.rates.social - self.rates.income_tax,
            )?,
            LegalStatus::EntrepriseIndividuelle
            | LegalStatus::Eirl
            | LegalStatus::PortageSalarial => {
                self.invert_linear(target_net, self.salary_multiplier())?
            }
            LegalStatus::Eurl | LegalStatus::Sasu => self.invert_corporate(target_net, profile)?,
        };

        Ok(round_half_up(revenue))
    }

    /// Minimum daily rate to produce `revenue` over `worked_days` days.
    pub fn required_daily_rate(
        revenue: Decimal,
        worked_days: Decimal,
    ) -> Result<Decimal, SolverError> {
        if worked_days <= Decimal::ZERO {
            return Err(SolverError::NoWorkedDays);
        }
        Ok(round_half_up(revenue / worked_days))
    }

    /// Fraction of a salary (or pass-through revenue) kept after social
    /// contributions and income tax.
    fn salary_multiplier(&self) -> Decimal {
        (Decimal::ONE - self.rates.social) * (Decimal::ONE - self.rates.income_tax)
    }

    fn corporate_keep(&self) -> Decimal {
        Decimal::ONE - self.rates.corporate.unwrap_or(Decimal::ZERO)
    }

    fn invert_linear(
        &self,
        target: Decimal,
        multiplier: Decimal,
    ) -> Result<Decimal, SolverError> {
        if multiplier <= Decimal::ZERO {
            Err(SolverError::UnreachableTarget(target))
        } else {
            Ok(target / multiplier)
        }
    }

    fn invert_corporate(
        &self,
        target: Decimal,
        profile: &Profile,
    ) -> Result<Decimal, SolverError> {
        let share = salary_share(profile);
        let strategy = match profile.remuneration {
            RemunerationStrategy::Mixed if share.is_zero() => RemunerationStrategy::Dividends,
            other => other,
        };

        match strategy {
            RemunerationStrategy::Salary => self.invert_linear(target, self.salary_multiplier()),
            RemunerationStrategy::Dividends => {
                let dividends = self.invert_dividends(target, profile)?;
                self.invert_linear(dividends, self.corporate_keep())
            }
            RemunerationStrategy::Mixed => self.invert_mixed(target, share, profile),
        }
    }

    /// After-corporate-tax dividend amount whose net equals `target`.
    fn invert_dividends(
        &self,
        target: Decimal,
        profile: &Profile,
    ) -> Result<Decimal, SolverError> {
        let flat_keep = Decimal::ONE - DIVIDEND_FLAT_TAX_RATE;

        match profile.legal_status {
            LegalStatus::Sasu => self.invert_linear(target, flat_keep),
            _ => {
                let threshold = profile.share_capital * DIVIDEND_CAPITAL_THRESHOLD_SHARE;
                let net_at_threshold = threshold * flat_keep;
                if target <= net_at_threshold {
                    self.invert_linear(target, flat_keep)
                } else {
                    let excess =
                        self.invert_linear(target - net_at_threshold, self.salary_multiplier())?;
                    Ok(threshold + excess)
                }
            }
        }
    }

    fn invert_mixed(
        &self,
        target: Decimal,
        share: Decimal,
        profile: &Profile,
    ) -> Result<Decimal, SolverError> {
        let salary_mult = self.salary_multiplier();
        let flat_keep = Decimal::ONE - DIVIDEND_FLAT_TAX_RATE;
        // Dividends received per unit of revenue.
        let dividend_factor = (Decimal::ONE - share) * self.corporate_keep();

        if dividend_factor <= Decimal::ZERO {
            // Salary takes the whole revenue.
            return self.invert_linear(target, share * salary_mult);
        }

        match profile.legal_status {
            LegalStatus::Sasu => self.invert_linear(
                target,
                share * salary_mult + dividend_factor * flat_keep,
            ),
            _ => {
                let threshold = profile.share_capital * DIVIDEND_CAPITAL_THRESHOLD_SHARE;
                if threshold.is_zero() {
                    // No flat tranche: every dividend is on the
                    // contributions-then-tax path.
                    return self.invert_linear(
                        target,
                        share * salary_mult + dividend_factor * salary_mult,
                    );
                }

                // Revenue at which the dividends exactly fill the flat
                // tranche, and the net reached there.
                let breakpoint = threshold / dividend_factor;
                let net_at_breakpoint =
                    breakpoint * share * salary_mult + threshold * flat_keep;

                if target <= net_at_breakpoint {
                    self.invert_linear(target, share * salary_mult + dividend_factor * flat_keep)
                } else {
                    let excess = self.invert_linear(
                        target - net_at_breakpoint,
                        share * salary_mult + dividend_factor * salary_mult,
                    )?;
                    Ok(breakpoint + excess)
                }
            }
        }
    }
}
