// fluxcheck-core/src/application/workspace.rs

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::ports::SpecificationSource;
use crate::domain::project::ProjectConfig;
use crate::domain::routing::RoutingPlan;
use crate::domain::specification::{
    AliasTable, SheetLayout, SpecificationDocument, SpecificationStore, StoreOptions,
};
use crate::error::FluxError;
use crate::infrastructure::adapters::specification_source_for;
use crate::infrastructure::config::load_project_config;

/// A loaded project: configuration plus the cahier des charges it points to.
/// Everything a run needs, built once and passed by reference.
pub struct Workspace {
    pub project_dir: PathBuf,
    pub config: ProjectConfig,
    pub store: SpecificationStore,
    pub plan: RoutingPlan,
}

impl Workspace {
    /// Fatal on missing/invalid configuration and on an unreadable document.
    #[instrument(skip_all, fields(project = ?project_dir))]
    pub fn load(project_dir: &Path) -> Result<Self, FluxError> {
        let config = load_project_config(project_dir)?;
        let spec_path = config.specification_path(project_dir);
        let source = specification_source_for(&spec_path, config.delimiter_byte())?;
        Self::load_with(project_dir, config, source.as_ref())
    }

    pub fn load_with(
        project_dir: &Path,
        config: ProjectConfig,
        source: &dyn SpecificationSource,
    ) -> Result<Self, FluxError> {
        let spec_path = config.specification_path(project_dir);
        info!(path = ?spec_path, "📚 Loading cahier des charges");
        let document = source.load(&spec_path)?;
        Self::from_document(project_dir, config, &document)
    }

    pub fn from_document(
        project_dir: &Path,
        config: ProjectConfig,
        document: &SpecificationDocument,
    ) -> Result<Self, FluxError> {
        let options = StoreOptions {
            layout: SheetLayout::STANDARD,
            notice_sheet: config.naming.notice_sheet.clone(),
            provider: config.naming.provider.clone(),
            aliases: AliasTable::with_extra(&config.aliases)?,
        };
        let store = SpecificationStore::load(document, &options)?;
        for sheet in store.skipped_sheets() {
            warn!(sheet = %sheet, "Sheet without usable rules");
        }

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            plan: config.routing_plan(project_dir),
            config,
            store,
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.config.data_path(&self.project_dir)
    }

    pub fn specification_path(&self) -> PathBuf {
        self.config.specification_path(&self.project_dir)
    }

    pub fn report_path(&self) -> PathBuf {
        self.config.report_path(&self.project_dir)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.config.ledger_path(&self.project_dir)
    }

    pub fn audit_ledger_path(&self) -> PathBuf {
        self.config.audit_ledger_path(&self.project_dir)
    }

    pub fn audit_report_path(&self) -> PathBuf {
        self.config.audit_report_path(&self.project_dir)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::specification::store::tests::sample_document;
    use anyhow::Result;

    pub(crate) fn config(yaml: &str) -> ProjectConfig {
        serde_yaml::from_str(yaml).unwrap_or_else(|e| panic!("bad test config: {e}"))
    }

    struct FixedSource(SpecificationDocument);

    impl SpecificationSource for FixedSource {
        fn load(&self, _path: &Path) -> Result<SpecificationDocument, DomainError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_load_with_custom_source() -> Result<()> {
        let ws = Workspace::load_with(
            Path::new("/p"),
            config("name: t\nspecification: cahier\n"),
            &FixedSource(sample_document()),
        )?;
        assert!(ws.store.is_sanctioned("HONORAIRES"));
        assert_eq!(ws.data_dir(), PathBuf::from("/p/data"));
        assert_eq!(ws.plan.rejected_root, PathBuf::from("/p/NO_MATCH"));
        Ok(())
    }

    #[test]
    fn test_configured_aliases_are_merged() -> Result<()> {
        let ws = Workspace::from_document(
            Path::new("/p"),
            config(
                "name: t\nspecification: cahier\naliases:\n  - sheet: PRESTATIONSANTE\n    flux: PRESTATION_SANTE\n",
            ),
            &sample_document(),
        )?;
        assert!(ws.store.is_declared("PRESTATION_SANTE"));
        assert!(ws.store.is_declared("PRESTATIONSANTE"));
        Ok(())
    }

    #[test]
    fn test_wrong_notice_sheet_is_fatal() {
        let result = Workspace::from_document(
            Path::new("/p"),
            config("name: t\nspecification: cahier\nnaming:\n  notice-sheet: Lisez-moi\n"),
            &sample_document(),
        );
        assert!(matches!(
            result,
            Err(FluxError::Domain(DomainError::NoticeMissing(_)))
        ));
    }
}
