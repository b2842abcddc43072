use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Legal statuses available to a self-employed worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalStatus {
    MicroEntreprise,
    EntrepriseIndividuelle,
    Eirl,
    PortageSalarial,
    Eurl,
    Sasu,
}

impl LegalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MicroEntreprise => "micro",
            Self::EntrepriseIndividuelle => "ei",
            Self::Eirl => "eirl",
            Self::PortageSalarial => "portage",
            Self::Eurl => "eurl",
            Self::Sasu => "sasu",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "micro" => Some(Self::MicroEntreprise),
            "ei" => Some(Self::EntrepriseIndividuelle),
            "eirl" => Some(Self::Eirl),
            "portage" => Some(Self::PortageSalarial),
            "eurl" => Some(Self::Eurl),
            "sasu" => Some(Self::Sasu),
            _ => None,
        }
    }

    /// Unknown codes fall back to the flat-rate status; the hosting
    /// application always offers it as the default.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::MicroEntreprise)
    }

    pub fn all() -> [Self; 6] {
        [
            Self::MicroEntreprise,
            Self::EntrepriseIndividuelle,
            Self::Eirl,
            Self::PortageSalarial,
            Self::Eurl,
            Self::Sasu,
        ]
    }
}

/// How the owner of a corporate-tax-bearing company extracts income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemunerationStrategy {
    Salary,
    Dividends,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub monthly_expenses: Decimal,
    pub cash_reserve: Decimal,
    /// Informational only; never enters a revenue or tax formula.
    pub weekly_admin_hours: Decimal,
    pub weekly_working_days: Decimal,
    pub legal_status: LegalStatus,
    pub remuneration: RemunerationStrategy,
    /// Salary share of revenue under the mixed strategy, in percent (0-100).
    pub mixed_salary_share: Decimal,
    /// Share capital; the EURL dividend threshold is 10 % of this.
    pub share_capital: Decimal,
    pub social_rate_override: Option<Decimal>,
    pub income_tax_rate_override: Option<Decimal>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            monthly_expenses: Decimal::ZERO,
            cash_reserve: Decimal::ZERO,
            weekly_admin_hours: Decimal::ZERO,
            weekly_working_days: dec!(5),
            legal_status: LegalStatus::MicroEntreprise,
            remuneration: RemunerationStrategy::Salary,
            mixed_salary_share: dec!(50),
            share_capital: Decimal::ZERO,
            social_rate_override: None,
            income_tax_rate_override: None,
        }
    }
}
