use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::PROJECT_ID_VAR;
use crate::credentials::CredentialProvider;
use crate::log::Logger;
use crate::model::work_item::WorkItem;
use crate::providers::Tracker;
use crate::source;
use crate::transform::{transform, TransformOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub csv_path: PathBuf,
    pub transform: TransformOptions,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    MissingProjectId,
    MissingToken,
    DryRun { planned: usize, skipped_rows: usize },
    Completed { submitted: usize, skipped_rows: usize },
}

/// Tell the operator how to pass the project id. The usage line is a
/// warning so the console shows it highlighted.
pub fn report_missing_project_id(logger: &Logger) {
    logger.error(
        "missing_project_id",
        None,
        &format!("You must pass {PROJECT_ID_VAR} in environment variables"),
    );
    logger.warn(
        "usage",
        &format!("example: $ {PROJECT_ID_VAR}=xxxx storyload"),
    );
}

/// Stories built from the input file, plus how many rows failed to parse.
#[derive(Debug, Default)]
pub struct Plan {
    pub items: Vec<WorkItem>,
    pub skipped_rows: usize,
}

pub struct Importer {
    tracker: Box<dyn Tracker>,
    credentials: Box<dyn CredentialProvider>,
    logger: Logger,
    options: ImportOptions,
}

impl Importer {
    pub fn new(
        tracker: Box<dyn Tracker>,
        credentials: Box<dyn CredentialProvider>,
        logger: Logger,
        options: ImportOptions,
    ) -> Self {
        Self {
            tracker,
            credentials,
            logger,
            options,
        }
    }

    /// Read, transform and submit every story, one request at a time.
    ///
    /// Missing configuration ends the run early with an `Ok` outcome and
    /// nothing read or sent. A failed submission aborts the run; stories
    /// after it are not sent.
    pub async fn run(&self, project_id: Option<String>) -> Result<RunOutcome> {
        let Some(project_id) = project_id.filter(|p| !p.is_empty()) else {
            report_missing_project_id(&self.logger);
            return Ok(RunOutcome::MissingProjectId);
        };

        if self.options.dry_run {
            let plan = self.plan()?;
            for item in &plan.items {
                self.logger.info("planned", Some(&item.name), None);
            }
            return Ok(RunOutcome::DryRun {
                planned: plan.items.len(),
                skipped_rows: plan.skipped_rows,
            });
        }

        let token = self.credentials.token().await?;
        if token.is_empty() {
            self.logger.error("missing_token", None, "no token passed");
            return Ok(RunOutcome::MissingToken);
        }

        let plan = self.plan()?;
        for item in &plan.items {
            self.tracker
                .create_story(&project_id, &token, item)
                .await
                .with_context(|| {
                    format!(
                        "Failed to create \"{}\" in {} project {project_id}",
                        item.name,
                        self.tracker.name()
                    )
                })?;
            self.logger.info("processed", Some(&item.name), None);
        }

        let submitted = plan.items.len();
        self.logger.info(
            "summary",
            None,
            Some(&format!(
                "created {submitted} stories in project {project_id}"
            )),
        );
        Ok(RunOutcome::Completed {
            submitted,
            skipped_rows: plan.skipped_rows,
        })
    }

    /// Parse the input file and transform every row, in file order.
    pub fn plan(&self) -> Result<Plan> {
        let content = source::read_file(&self.options.csv_path)?;
        let mut plan = Plan::default();

        for (index, row) in source::rows(&content).enumerate() {
            match row {
                Ok(row) => plan
                    .items
                    .extend(transform(&row, &self.options.transform)),
                Err(e) => {
                    plan.skipped_rows += 1;
                    self.logger
                        .warn("bad_row", &format!("skipped record {}: {e}", index + 1));
                }
            }
        }

        Ok(plan)
    }
}
