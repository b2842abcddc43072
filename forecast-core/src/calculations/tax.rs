//! Gross-revenue to net-income conversion.
//!
//! One consolidated engine for every consumer: comparison, goal-setting
//! and transition-planning callers all go through here, so the formulas
//! cannot drift apart. Branches strictly on legal status and, for the
//! corporate-tax-bearing statuses, on the remuneration strategy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{
    ACRE_SOCIAL_FACTOR, DIVIDEND_CAPITAL_THRESHOLD_SHARE, DIVIDEND_FLAT_TAX_RATE, LegalStatus,
    Profile, RemunerationStrategy,
};

const PERCENT: Decimal = dec!(100);

/// Rates actually used in a computation: the status table with any
/// profile-level overrides applied on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRates {
    pub social: Decimal,
    pub income_tax: Decimal,
    pub corporate: Option<Decimal>,
}

impl EffectiveRates {
    /// Overrides supersede the status defaults everywhere they appear,
    /// including inside the mixed branch.
    pub fn resolve(profile: &Profile) -> Self {
        let defaults = profile.legal_status.rates();
        Self {
            social: profile
                .social_rate_override
                .unwrap_or(defaults.social_rate),
            income_tax: profile
                .income_tax_rate_override
                .unwrap_or(defaults.income_tax_rate),
            corporate: defaults.corporate_tax_rate,
        }
    }

    /// ACRE-style contribution reduction: same formulas, reduced social
    /// rate.
    pub fn with_acre(self) -> Self {
        Self {
            social: self.social * ACRE_SOCIAL_FACTOR,
            ..self
        }
    }
}

/// Net-income result with the intermediate charges broken out.
///
/// `net_income` is deliberately not clamped at zero: a loss-making
/// scenario must surface as a negative number so the caller can warn the
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetIncomeBreakdown {
    pub annual_revenue: Decimal,
    pub social_contributions: Decimal,
    pub income_tax: Decimal,
    pub corporate_tax: Decimal,
    pub dividend_tax: Decimal,
    pub net_income: Decimal,
}

/// Charges and net for one slice of remuneration (a salary portion or a
/// dividend portion).
#[derive(Debug, Clone, Copy, Default)]
struct Portion {
    social: Decimal,
    income_tax: Decimal,
    dividend_tax: Decimal,
    net: Decimal,
}

/// Converts annual gross revenue into net annual income.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use forecast_core::models::Profile;
/// use forecast_core::calculations::tax::TaxEngine;
///
/// // Flat-rate status: both rates apply directly to gross revenue.
/// let profile = Profile::default();
/// let breakdown = TaxEngine::for_profile(&profile).net_income(dec!(60000), &profile);
///
/// assert_eq!(breakdown.social_contributions, dec!(15360));
/// assert_eq!(breakdown.income_tax, dec!(6600));
/// assert_eq!(breakdown.net_income, dec!(38040));
/// ```
#[derive(Debug, Clone)]
pub struct TaxEngine {
    rates: EffectiveRates,
}

impl TaxEngine {
    pub fn new(rates: EffectiveRates) -> Self {
        Self { rates }
    }

    pub fn for_profile(profile: &Profile) -> Self {
        Self::new(EffectiveRates::resolve(profile))
    }

    /// Same engine with the ACRE reduction substituted into the rates.
    pub fn with_acre(self) -> Self {
        Self::new(self.rates.with_acre())
    }

    pub fn rates(&self) -> &EffectiveRates {
        &self.rates
    }

    pub fn net_income(&self, annual_revenue: Decimal, profile: &Profile) -> NetIncomeBreakdown {
        match profile.legal_status {
            LegalStatus::MicroEntreprise => self.flat_rate(annual_revenue),
            LegalStatus::EntrepriseIndividuelle
            | LegalStatus::Eirl
            | LegalStatus::PortageSalarial => self.pass_through(annual_revenue),
            LegalStatus::Eurl | LegalStatus::Sasu => self.corporate(annual_revenue, profile),
        }
    }

    /// Flat-rate regime: both rates apply directly to gross revenue.
    fn flat_rate(&self, revenue: Decimal) -> NetIncomeBreakdown {
        let social = round_half_up(revenue * self.rates.social);
        let income_tax = round_half_up(revenue * self.rates.income_tax);
        NetIncomeBreakdown {
            annual_revenue: revenue,
            social_contributions: social,
            income_tax,
            corporate_tax: Decimal::ZERO,
            dividend_tax: Decimal::ZERO,
            net_income: revenue - social - income_tax,
        }
    }

    /// Pass-through regime: social contributions first, income tax on the
    /// remainder. The corporate salary-only case uses the same shape,
    /// since salary is a deductible expense.
    fn pass_through(&self, revenue: Decimal) -> NetIncomeBreakdown {
        let portion = self.salary_portion(revenue);
        NetIncomeBreakdown {
            annual_revenue: revenue,
            social_contributions: portion.social,
            income_tax: portion.income_tax,
            corporate_tax: Decimal::ZERO,
            dividend_tax: Decimal::ZERO,
            net_income: portion.net,
        }
    }

    fn corporate(&self, revenue: Decimal, profile: &Profile) -> NetIncomeBreakdown {
        let share = salary_share(profile);
        let strategy = match profile.remuneration {
            // A mixed split with no salary component is dividends-only.
            RemunerationStrategy::Mixed if share.is_zero() => RemunerationStrategy::Dividends,
            other => other,
        };

        match strategy {
            RemunerationStrategy::Salary => self.pass_through(revenue),
            RemunerationStrategy::Dividends => {
                let corporate_tax = round_half_up(revenue * self.corporate_rate());
                let portion =
                    self.dividend_portion(revenue - corporate_tax, profile.legal_status, profile);
                NetIncomeBreakdown {
                    annual_revenue: revenue,
                    social_contributions: portion.social,
                    income_tax: portion.income_tax,
                    corporate_tax,
                    dividend_tax: portion.dividend_tax,
                    net_income: portion.net,
                }
            }
            RemunerationStrategy::Mixed => {
                let salary_amount = round_half_up(revenue * share);
                let remainder = revenue - salary_amount;
                let corporate_tax = round_half_up(remainder * self.corporate_rate());

                let salary = self.salary_portion(salary_amount);
                let dividends = self.dividend_portion(
                    remainder - corporate_tax,
                    profile.legal_status,
                    profile,
                );

                NetIncomeBreakdown {
                    annual_revenue: revenue,
                    social_contributions: salary.social + dividends.social,
                    income_tax: salary.income_tax + dividends.income_tax,
                    corporate_tax,
                    dividend_tax: dividends.dividend_tax,
                    net_income: salary.net + dividends.net,
                }
            }
        }
    }

    fn salary_portion(&self, amount: Decimal) -> Portion {
        let social = round_half_up(amount * self.rates.social);
        let after_social = amount - social;
        let income_tax = round_half_up(after_social * self.rates.income_tax);
        Portion {
            social,
            income_tax,
            dividend_tax: Decimal::ZERO,
            net: after_social - income_tax,
        }
    }

    /// Two structurally different dividend paths:
    ///
    /// - SASU: the whole dividend takes the flat combined rate, no
    ///   separate social-contribution step.
    /// - EURL: the tranche up to 10 % of share capital takes the flat
    ///   rate; the excess takes social contributions, then income tax.
    fn dividend_portion(
        &self,
        after_corporate: Decimal,
        status: LegalStatus,
        profile: &Profile,
    ) -> Portion {
        let dividends = after_corporate.max(Decimal::ZERO);

        match status {
            LegalStatus::Sasu => {
                let dividend_tax = round_half_up(dividends * DIVIDEND_FLAT_TAX_RATE);
                Portion {
                    dividend_tax,
                    net: dividends - dividend_tax,
                    ..Portion::default()
                }
            }
            _ => {
                let threshold = profile.share_capital * DIVIDEND_CAPITAL_THRESHOLD_SHARE;
                let below = dividends.min(threshold);
                let above = dividends - below;

                let dividend_tax = round_half_up(below * DIVIDEND_FLAT_TAX_RATE);
                let social = round_half_up(above * self.rates.social);
                let taxable = above - social;
                let income_tax = round_half_up(taxable * self.rates.income_tax);

                Portion {
                    social,
                    income_tax,
                    dividend_tax,
                    net: (below - dividend_tax) + (taxable - income_tax),
                }
            }
        }
    }

    fn corporate_rate(&self) -> Decimal {
        self.rates.corporate.unwrap_or(Decimal::ZERO)
    }
}

/// Mixed-mode salary share as a fraction, clamped to [0, 1].
pub(crate) fn salary_share(profile: &Profile) -> Decimal {
    (profile.mixed_salary_share / PERCENT)
        .max(Decimal::ZERO)
        .min(Decimal::ONE)
}
