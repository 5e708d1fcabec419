// fluxcheck-core/src/domain/naming/grammar.rs

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::error::DomainError;
use crate::domain::naming::period::{EntityId, Period};
use crate::domain::naming::segment::GrammarSegment;

pub const DEFAULT_PROVIDER: &str = "OCIANE_RC2";
pub const DEFAULT_EXTENSION: &str = "csv";

fn re_date_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\d{8}").unwrap_or_else(|_| {
            // Hardcoded pattern: cannot fail.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Semantic fields of a conforming filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub entity: Option<EntityId>,
    pub mode: Option<String>,
    pub batch: String,
    pub flux: String,
    pub period: Period,
    /// `_F` marker after the period (forced mode).
    pub forced: bool,
    /// Embedded dates, in calendar order, duplicates removed.
    pub dates: Vec<NaiveDate>,
}

impl ParsedName {
    /// Latest embedded date: the reporting date of the file.
    pub fn reporting_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMismatch {
    /// The whole-filename grammar did not match. `failed_segment` is the first segment
    /// (in grammar order) not found anywhere in the name, if any.
    Grammar {
        failed_segment: Option<GrammarSegment>,
    },
    /// The date segment matched but one block is not a calendar date.
    InvalidDate(String),
}

/// The compiled naming grammar of flux files.
pub struct NamingRule {
    full: Regex,
    segment_checks: Vec<(GrammarSegment, Regex)>,
}

impl NamingRule {
    pub fn new(provider: &str, extension: &str) -> Result<Self, DomainError> {
        let provider = regex::escape(provider);
        let extension = regex::escape(extension.trim_start_matches('.'));

        let full = format!(
            concat!(
                r"^(?:ENT-(?P<entity>[1-9]|[1-9][0-9]|100)_)?",
                r"(?P<mode>MOD1_)?",
                r"{provider}_(?P<batch>\d+)_",
                r"(?P<flux>[A-Z]+(?:_[A-Z]+)*)",
                r"_(?P<period>Q|M)(?P<forced>_F)?",
                r"_(?P<dates>\d{{8}}(?:\d{{8}})?(?:_\d{{8}})*)",
                r"\.{extension}$"
            ),
            provider = provider,
            extension = extension
        );

        let compile = |s: &str| Regex::new(s).map_err(|e| DomainError::InvalidGrammar(e.to_string()));

        Ok(Self {
            full: compile(&full)?,
            segment_checks: GrammarSegment::ORDER
                .iter()
                .map(|seg| compile(&segment_source(*seg, &provider, &extension)).map(|re| (*seg, re)))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    pub fn standard() -> Result<Self, DomainError> {
        Self::new(DEFAULT_PROVIDER, DEFAULT_EXTENSION)
    }

    /// Anchored, all-or-nothing parse of a filename.
    pub fn parse(&self, filename: &str) -> Result<ParsedName, NameMismatch> {
        let caps = self.full.captures(filename).ok_or_else(|| NameMismatch::Grammar {
            failed_segment: self.first_failed_segment(filename),
        })?;

        let group = |name: &str| caps.name(name).map(|m| m.as_str());

        let period = group("period")
            .and_then(Period::from_code)
            .ok_or(NameMismatch::Grammar {
                failed_segment: Some(GrammarSegment::Period),
            })?;

        let raw_dates = group("dates").unwrap_or_default();
        let mut dates = re_date_block()
            .find_iter(raw_dates)
            .map(|m| {
                NaiveDate::parse_from_str(m.as_str(), "%Y%m%d")
                    .map_err(|_| NameMismatch::InvalidDate(m.as_str().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        // Calendar order, not appearance order.
        dates.sort();
        dates.dedup();

        Ok(ParsedName {
            entity: group("entity").and_then(|e| e.parse().ok()).map(EntityId),
            mode: group("mode").map(|m| m.trim_end_matches('_').to_string()),
            batch: group("batch").unwrap_or_default().to_string(),
            flux: group("flux").unwrap_or_default().to_string(),
            period,
            forced: group("forced").is_some(),
            dates,
        })
    }

    /// Best-effort diagnostic: each segment is searched independently, so a later
    /// segment may also be broken.
    pub fn first_failed_segment(&self, filename: &str) -> Option<GrammarSegment> {
        self.segment_checks
            .iter()
            .find(|(_, re)| !re.is_match(filename))
            .map(|(seg, _)| *seg)
    }
}

/// Unanchored pattern of one segment, searched anywhere in a rejected filename.
/// `provider` and `extension` are already escaped.
fn segment_source(segment: GrammarSegment, provider: &str, extension: &str) -> String {
    match segment {
        GrammarSegment::Entity => r"^(?:ENT-(?:[1-9]|[1-9][0-9]|100)_)?".to_string(),
        GrammarSegment::Mode => r"(?:MOD1_)?".to_string(),
        GrammarSegment::ProviderBatch => format!(r"{provider}_\d+_"),
        GrammarSegment::FluxName => r"[A-Z]+(?:_[A-Z]+)*".to_string(),
        GrammarSegment::Period => r"_(?:Q|M)(?:_F)?".to_string(),
        GrammarSegment::FirstDate => r"_\d{8}(?:\d{8})?".to_string(),
        GrammarSegment::AdditionalDates => r"(?:_\d{8})*".to_string(),
        GrammarSegment::Extension => format!(r"\.{extension}$"),
        // Never checked alone: only reported for impossible calendar dates.
        GrammarSegment::Dates => r"\d{8}".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y%m%d").unwrap()
    }

    #[test]
    fn test_parse_full_name() -> Result<()> {
        let rule = NamingRule::standard()?;
        let parsed = rule
            .parse("ENT-12_OCIANE_RC2_7_HONORAIRES_Q_20230101.csv")
            .unwrap();
        assert_eq!(parsed.entity, Some(EntityId(12)));
        assert_eq!(parsed.mode, None);
        assert_eq!(parsed.batch, "7");
        assert_eq!(parsed.flux, "HONORAIRES");
        assert_eq!(parsed.period, Period::Quarterly);
        assert!(!parsed.forced);
        assert_eq!(parsed.reporting_date(), Some(date("20230101")));
        Ok(())
    }

    #[test]
    fn test_parse_mode_forced_and_multiple_dates() -> Result<()> {
        let rule = NamingRule::standard()?;
        let parsed = rule
            .parse("MOD1_OCIANE_RC2_3_FORMULES_REMBOURSEMENTS_M_F_2023033120230101_20230215.csv")
            .unwrap();
        assert_eq!(parsed.entity, None);
        assert_eq!(parsed.mode.as_deref(), Some("MOD1"));
        assert_eq!(parsed.flux, "FORMULES_REMBOURSEMENTS");
        assert_eq!(parsed.period, Period::Monthly);
        assert!(parsed.forced);
        assert_eq!(
            parsed.dates,
            vec![date("20230101"), date("20230215"), date("20230331")]
        );
        // Latest by calendar, not by position.
        assert_eq!(parsed.reporting_date(), Some(date("20230331")));
        Ok(())
    }

    #[test]
    fn test_reject_non_matching_names() -> Result<()> {
        let rule = NamingRule::standard()?;
        assert_eq!(
            rule.parse("OCIANE_20220101_FLUX_20230101.txt"),
            Err(NameMismatch::Grammar {
                failed_segment: Some(GrammarSegment::ProviderBatch)
            })
        );
        // Lower-case flux name.
        assert!(rule.parse("OCIANE_RC2_1_honoraires_Q_20230101.csv").is_err());
        // Double underscore inside the flux name.
        assert!(rule.parse("OCIANE_RC2_1_HONO__RAIRES_Q_20230101.csv").is_err());
        // Entity outside 1..=100.
        assert!(rule.parse("ENT-101_OCIANE_RC2_1_HONORAIRES_Q_20230101.csv").is_err());
        // Wrong extension.
        assert_eq!(
            rule.parse("OCIANE_RC2_1_HONORAIRES_Q_20230101.txt"),
            Err(NameMismatch::Grammar {
                failed_segment: Some(GrammarSegment::Extension)
            })
        );
        Ok(())
    }

    #[test]
    fn test_failed_segment_order() -> Result<()> {
        let rule = NamingRule::standard()?;
        assert_eq!(
            rule.first_failed_segment("OCIANE_RC2_1_HONORAIRES_20230101.csv"),
            Some(GrammarSegment::Period)
        );
        assert_eq!(
            rule.first_failed_segment("OCIANE_RC2_1_HONORAIRES_Q_2023.csv"),
            Some(GrammarSegment::FirstDate)
        );
        let checked: Vec<GrammarSegment> = rule.segment_checks.iter().map(|(seg, _)| *seg).collect();
        assert_eq!(checked, GrammarSegment::ORDER);
        Ok(())
    }

    #[test]
    fn test_impossible_calendar_date() -> Result<()> {
        let rule = NamingRule::standard()?;
        assert_eq!(
            rule.parse("OCIANE_RC2_1_HONORAIRES_Q_20231345.csv"),
            Err(NameMismatch::InvalidDate("20231345".into()))
        );
        Ok(())
    }

    #[test]
    fn test_custom_provider_and_extension() -> Result<()> {
        let rule = NamingRule::new("ACME.PART", ".txt")?;
        assert!(rule.parse("ACME.PART_1_HONORAIRES_M_20230101.txt").is_ok());
        // The dot in the provider is literal.
        assert!(rule.parse("ACMEXPART_1_HONORAIRES_M_20230101.txt").is_err());
        Ok(())
    }
}
