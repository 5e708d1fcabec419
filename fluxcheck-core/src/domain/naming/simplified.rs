// fluxcheck-core/src/domain/naming/simplified.rs
//
// "Simplified name" extraction: a looser reading of a filename (or of a Notice template)
// that only cares about the flux name. Used for the Notice allow-list and for the
// best-guess flux of rejected files, never for acceptance.

use regex::Regex;

use crate::domain::error::DomainError;

pub struct SimplifiedNameExtractor {
    patterns: Vec<Regex>,
}

impl SimplifiedNameExtractor {
    pub fn new(provider: &str) -> Result<Self, DomainError> {
        let provider = regex::escape(provider);
        let sources = [
            // Notice template: Client_N°Flux_[MOD1_]NAME_FREQUENCE...
            r"Client_N°Flux_(?:MOD1_)?([A-Za-z]+(?:_[A-Za-z]+)*)_FREQUENCE".to_string(),
            // Flux file with a period marker
            format!(r"{provider}_\d+_([A-Za-z_]+?)_[QM]?_?F?_?\d{{8}}"),
            // Flux file without period marker
            format!(r"{provider}_\d+_([A-Za-z_]+?)_\d{{8}}"),
        ];

        let patterns = sources
            .iter()
            .map(|s| Regex::new(s).map_err(|e| DomainError::InvalidGrammar(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Upper-cased flux name from the first pattern that captures one.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|re| {
            re.captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_uppercase())
                .filter(|name| !name.is_empty())
        })
    }
}
