// fluxcheck-core/src/domain/specification/alias.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Sheet naming of the cahier des charges -> naming used in partner filenames.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("CONTRATSCOLLECTIFS", "CONTRATCOLLECTIF_STOCK"),
    ("ADHESIONSINDIVIDUELLES", "ADHESIONSINDIVIDUELLES_STOCK"),
    ("REFERENTIEL_FORMULE_REMB", "FORMULES_REMBOURSEMENTS"),
    ("REFERENTIEL_GROUPES", "REFERENTIEL_GROUPE"),
    ("DECLARATION_HONORAIRES", "HONORAIRES"),
    ("BENEXT", "BENEFICIAIRE_EXTERNE"),
];

/// One configured mapping (`aliases:` in fluxcheck.yaml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasPair {
    pub sheet: String,
    pub flux: String,
}

/// Bidirectional sheet name <-> flux name table. Unmapped names resolve to themselves.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    sheet_to_flux: BTreeMap<String, String>,
    flux_to_sheet: BTreeMap<String, String>,
}

impl AliasTable {
    /// Built-in pairs only.
    pub fn standard() -> Result<Self, DomainError> {
        Self::with_extra(&[])
    }

    /// Built-in pairs merged with configured ones.
    pub fn with_extra(extra: &[AliasPair]) -> Result<Self, DomainError> {
        let pairs = DEFAULT_ALIASES
            .iter()
            .map(|(s, f)| (s.to_string(), f.to_string()))
            .chain(extra.iter().map(|p| (p.sheet.clone(), p.flux.clone())));
        Self::from_pairs(pairs)
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = Self::default();

        for (sheet, flux) in pairs {
            let sheet = normalize(&sheet);
            let flux = normalize(&flux);
            if sheet == flux {
                continue;
            }
            insert_unique(&mut table.sheet_to_flux, &sheet, &flux)?;
            insert_unique(&mut table.flux_to_sheet, &flux, &sheet)?;
        }

        // A -> B together with B -> C would make B resolve differently depending on the
        // direction of the lookup.
        for (sheet, flux) in &table.sheet_to_flux {
            if table.sheet_to_flux.contains_key(flux) || table.flux_to_sheet.contains_key(sheet)
            {
                return Err(DomainError::CyclicAlias(sheet.clone()));
            }
        }

        Ok(table)
    }

    /// Sheet name (or already-canonical name) -> canonical flux name.
    pub fn to_flux(&self, name: &str) -> String {
        let key = normalize(name);
        self.sheet_to_flux.get(&key).cloned().unwrap_or(key)
    }

    /// Flux name -> sheet name of the cahier des charges.
    pub fn to_sheet(&self, flux: &str) -> String {
        let key = normalize(flux);
        self.flux_to_sheet.get(&key).cloned().unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.sheet_to_flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheet_to_flux.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

fn insert_unique(
    map: &mut BTreeMap<String, String>,
    key: &str,
    value: &str,
) -> Result<(), DomainError> {
    match map.get(key) {
        Some(existing) if existing != value => Err(DomainError::AmbiguousAlias {
            name: key.to_string(),
            first: existing.clone(),
            second: value.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            map.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
