// fluxcheck-core/src/domain/specification/store.rs

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::domain::error::DomainError;
use crate::domain::naming::SimplifiedNameExtractor;
use crate::domain::specification::alias::AliasTable;
use crate::domain::specification::document::{Sheet, SpecificationDocument};
use crate::domain::specification::field::FieldRule;
use crate::domain::specification::layout::{SheetGrid, SheetLayout};
use crate::domain::specification::tokens::is_affirmative;

pub const DEFAULT_NOTICE_SHEET: &str = "Notice";

/// Rules declared for one flux type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FluxSpecification {
    pub canonical_name: String,
    /// Other names this flux is known under (sheet name when it differs).
    pub aliases: BTreeSet<String>,
    /// Ordered, without duplicates.
    pub mandatory_fields: Vec<String>,
    pub field_rules: Vec<FieldRule>,
}

impl FluxSpecification {
    pub fn from_grid(canonical_name: &str, grid: &SheetGrid, layout: &SheetLayout) -> Self {
        let mut mandatory_fields: Vec<String> = Vec::new();
        for (name, flag) in layout.mandatory_rows(grid) {
            if flag.is_some_and(is_affirmative) && !mandatory_fields.iter().any(|f| f == name) {
                mandatory_fields.push(name.to_string());
            }
        }

        let field_rules = layout
            .rule_rows(grid)
            .map(|(name, type_label, length)| FieldRule::new(name, type_label, length))
            .collect();

        Self {
            canonical_name: canonical_name.to_string(),
            aliases: BTreeSet::new(),
            mandatory_fields,
            field_rules,
        }
    }

    pub fn is_mandatory(&self, field: &str) -> bool {
        self.mandatory_fields.iter().any(|f| f == field)
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.field_rules.iter().find(|r| r.name == field)
    }
}

/// Settings the store needs besides the document itself.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub layout: SheetLayout,
    pub notice_sheet: String,
    pub provider: String,
    pub aliases: AliasTable,
}

impl StoreOptions {
    pub fn standard() -> Result<Self, DomainError> {
        Ok(Self {
            layout: SheetLayout::STANDARD,
            notice_sheet: DEFAULT_NOTICE_SHEET.to_string(),
            provider: crate::domain::naming::grammar::DEFAULT_PROVIDER.to_string(),
            aliases: AliasTable::standard()?,
        })
    }
}

/// Typed, queryable view of the cahier des charges. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct SpecificationStore {
    fluxes: BTreeMap<String, FluxSpecification>,
    /// Every sheet identity after alias normalisation, eligible or not.
    known: BTreeSet<String>,
    /// Flux names sanctioned by the Notice sheet.
    sanctioned: BTreeSet<String>,
    skipped_sheets: Vec<String>,
    aliases: AliasTable,
}

impl SpecificationStore {
    pub fn load(
        document: &SpecificationDocument,
        options: &StoreOptions,
    ) -> Result<Self, DomainError> {
        let notice = document
            .sheet(&options.notice_sheet)
            .ok_or_else(|| DomainError::NoticeMissing(options.notice_sheet.clone()))?;
        let sanctioned = Self::load_notice(notice, options)?;
        info!(count = sanctioned.len(), "📜 Notice loaded");

        let mut fluxes: BTreeMap<String, FluxSpecification> = BTreeMap::new();
        let mut known = BTreeSet::new();
        let mut skipped_sheets = Vec::new();

        for sheet in &document.sheets {
            if sheet.name.trim().eq_ignore_ascii_case(options.notice_sheet.trim()) {
                continue;
            }
            let sheet_key = sheet.name.trim().to_uppercase();
            let canonical = options.aliases.to_flux(&sheet_key);
            known.insert(canonical.clone());

            if !options.layout.is_flux_sheet(&sheet.grid) {
                warn!(
                    sheet = %sheet.name,
                    columns = sheet.grid.width(),
                    "⚠️ Sheet skipped: fewer than {} columns",
                    options.layout.min_columns
                );
                skipped_sheets.push(sheet.name.clone());
                continue;
            }

            if let Some(existing) = fluxes.get_mut(&canonical) {
                warn!(
                    sheet = %sheet.name,
                    flux = %canonical,
                    "⚠️ Flux already declared by another sheet, keeping the first declaration"
                );
                existing.aliases.insert(sheet_key);
                skipped_sheets.push(sheet.name.clone());
                continue;
            }

            let mut spec = FluxSpecification::from_grid(&canonical, &sheet.grid, &options.layout);
            if sheet_key != canonical {
                spec.aliases.insert(sheet_key);
            }
            debug!(
                flux = %canonical,
                mandatory = spec.mandatory_fields.len(),
                rules = spec.field_rules.len(),
                "Flux specification extracted"
            );
            fluxes.insert(canonical, spec);
        }

        info!(
            fluxes = fluxes.len(),
            skipped = skipped_sheets.len(),
            "📦 Cahier des charges loaded"
        );

        Ok(Self {
            fluxes,
            known,
            sanctioned,
            skipped_sheets,
            aliases: options.aliases.clone(),
        })
    }

    fn load_notice(notice: &Sheet, options: &StoreOptions) -> Result<BTreeSet<String>, DomainError> {
        let extractor = SimplifiedNameExtractor::new(&options.provider)?;
        let names: BTreeSet<String> = options
            .layout
            .notice_entries(&notice.grid)
            .filter_map(|entry| extractor.extract(entry))
            .map(|name| options.aliases.to_flux(&name))
            .collect();

        if names.is_empty() {
            return Err(DomainError::NoticeEmpty(notice.name.clone()));
        }
        Ok(names)
    }

    /// Rules of a flux, looked up by canonical or sheet name.
    pub fn rules_for(&self, flux_identity: &str) -> Result<&FluxSpecification, DomainError> {
        let canonical = self.aliases.to_flux(flux_identity);
        self.fluxes
            .get(&canonical)
            .ok_or_else(|| DomainError::FluxNotFound(flux_identity.to_string()))
    }

    /// First gate: the flux is declared by a sheet of the document.
    pub fn is_declared(&self, flux_identity: &str) -> bool {
        self.known.contains(&self.aliases.to_flux(flux_identity))
    }

    /// Second gate: the flux is sanctioned by the Notice.
    pub fn is_sanctioned(&self, flux_identity: &str) -> bool {
        self.sanctioned.contains(&self.aliases.to_flux(flux_identity))
    }

    pub fn canonical(&self, flux_identity: &str) -> String {
        self.aliases.to_flux(flux_identity)
    }

    pub fn declared_fluxes(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    pub fn sanctioned_fluxes(&self) -> impl Iterator<Item = &str> {
        self.sanctioned.iter().map(String::as_str)
    }

    pub fn skipped_sheets(&self) -> &[String] {
        &self.skipped_sheets
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::specification::field::FieldType;
    use anyhow::Result;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    pub(crate) fn honoraires_grid() -> SheetGrid {
        SheetGrid::new(vec![
            row(&["Cahier des charges", "", "", "", "", "", ""]),
            row(&["Flux", "DECLARATION_HONORAIRES", "", "", "", "", ""]),
            row(&["", "", "", "", "", "", ""]),
            row(&["N°", "Bloc", "Nom du champ", "Obligatoire", "Description", "Type", "Longueur"]),
            row(&["1", "Contrat", "NUMERO_CONTRAT", "Oui", "", "Alphanumérique", "20"]),
            row(&["2", "Contrat", "DATE_EFFET", "oui ", "", "Date aaaammjj", "8"]),
            row(&["3", "Montant", "MONTANT", "Non", "", "Numérique", "12"]),
            row(&["4", "Flag", "EST_ACTIF", "Non", "", "Booléen", "1"]),
            row(&["5", "Divers", "COMMENTAIRE", "Non", "", "Texte libre", ""]),
            row(&["", "", "", "", "", "", ""]),
            row(&["", "", "Remarque", "Oui", "", "", ""]),
        ])
    }

    pub(crate) fn notice_grid(entries: &[&str]) -> SheetGrid {
        let mut rows: Vec<Vec<String>> = (0..12).map(|_| row(&["Notice", ""])).collect();
        rows.extend(entries.iter().map(|e| row(&["", e])));
        SheetGrid::new(rows)
    }

    pub(crate) fn sample_document() -> SpecificationDocument {
        SpecificationDocument::new(vec![
            Sheet {
                name: "Notice".into(),
                grid: notice_grid(&[
                    "Client_N°Flux_HONORAIRES_FREQUENCE_DATEEXECUTION",
                    "Client_N°Flux_MOD1_PRESTATIONSANTE_FREQUENCE_DATEEXECUTION",
                    "Client_N°Flux_CONTRATCOLLECTIF_STOCK_FREQUENCE_DATEEXECUTION",
                ]),
            },
            Sheet {
                name: "DECLARATION_HONORAIRES".into(),
                grid: honoraires_grid(),
            },
            Sheet {
                name: "PRESTATIONSANTE".into(),
                grid: SheetGrid::new(vec![row(&["a", "b", "c"])]),
            },
            Sheet {
                name: "ENCAISSEMENTS".into(),
                grid: honoraires_grid(),
            },
        ])
    }

    #[test]
    fn test_load_extracts_rules_through_aliases() -> Result<()> {
        let store = SpecificationStore::load(&sample_document(), &StoreOptions::standard()?)?;

        let spec = store.rules_for("HONORAIRES")?;
        assert_eq!(spec.canonical_name, "HONORAIRES");
        assert!(spec.aliases.contains("DECLARATION_HONORAIRES"));
        assert_eq!(spec.mandatory_fields, vec!["NUMERO_CONTRAT", "DATE_EFFET", "Remarque"]);

        // The rule table stops at the blank row, before "Remarque".
        let names: Vec<&str> = spec.field_rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["NUMERO_CONTRAT", "DATE_EFFET", "MONTANT", "EST_ACTIF", "COMMENTAIRE"]
        );
        assert_eq!(spec.rule("MONTANT").map(|r| &r.declared_type), Some(&FieldType::Numeric));
        assert_eq!(
            spec.rule("COMMENTAIRE").map(|r| &r.declared_type),
            Some(&FieldType::Unrecognized("Texte libre".into()))
        );

        // Sheet naming resolves to the same specification.
        assert_eq!(store.rules_for("DECLARATION_HONORAIRES")?, spec);
        Ok(())
    }

    #[test]
    fn test_narrow_sheet_is_skipped_but_declared() -> Result<()> {
        let store = SpecificationStore::load(&sample_document(), &StoreOptions::standard()?)?;
        assert_eq!(store.skipped_sheets(), &["PRESTATIONSANTE".to_string()]);
        assert!(store.is_declared("PRESTATIONSANTE"));
        assert!(matches!(
            store.rules_for("PRESTATIONSANTE"),
            Err(DomainError::FluxNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_dual_allow_lists() -> Result<()> {
        let store = SpecificationStore::load(&sample_document(), &StoreOptions::standard()?)?;
        // Declared and sanctioned.
        assert!(store.is_declared("HONORAIRES") && store.is_sanctioned("HONORAIRES"));
        // Declared only.
        assert!(store.is_declared("ENCAISSEMENTS") && !store.is_sanctioned("ENCAISSEMENTS"));
        // Sanctioned only (Notice uses the filename convention).
        assert!(
            !store.is_declared("CONTRATCOLLECTIF_STOCK")
                && store.is_sanctioned("CONTRATCOLLECTIF_STOCK")
        );
        // The Notice sheet itself is not a flux.
        assert!(!store.is_declared("NOTICE"));
        Ok(())
    }

    #[test]
    fn test_missing_or_empty_notice_is_fatal() -> Result<()> {
        let mut doc = sample_document();
        doc.sheets.retain(|s| s.name != "Notice");
        assert!(matches!(
            SpecificationStore::load(&doc, &StoreOptions::standard()?),
            Err(DomainError::NoticeMissing(_))
        ));

        let mut doc = sample_document();
        doc.sheets[0].grid = notice_grid(&["Pas de flux ici"]);
        assert!(matches!(
            SpecificationStore::load(&doc, &StoreOptions::standard()?),
            Err(DomainError::NoticeEmpty(_))
        ));
        Ok(())
    }

    #[test]
    fn test_duplicate_canonical_keeps_first_sheet() -> Result<()> {
        let mut doc = sample_document();
        doc.sheets.push(Sheet {
            name: "HONORAIRES".into(),
            grid: SheetGrid::new(vec![row(&["a", "b", "c", "d"])]),
        });
        let store = SpecificationStore::load(&doc, &StoreOptions::standard()?)?;
        let spec = store.rules_for("HONORAIRES")?;
        assert_eq!(spec.mandatory_fields.len(), 3);
        assert!(store.skipped_sheets().contains(&"HONORAIRES".to_string()));
        Ok(())
    }
}
