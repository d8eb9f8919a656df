use crate::document::Document;
use crate::error::MigrationError;
use crate::family::DocumentFamily;
use crate::version::{Resolution, SatisfiedVersions, format_version_list};
use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, info, warn};

/// What a run would do to a document, computed without touching it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    pub resolution: Resolution,
    /// Registered versions still to apply, ascending
    pub outstanding: Vec<u32>,
    /// Recorded versions newer than any registered step
    pub unknown: Vec<u32>,
}

impl MigrationPlan {
    pub fn is_current(&self) -> bool {
        self.outstanding.is_empty()
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    pub document: Document,
    /// Versions applied during this run, in application order
    pub applied: Vec<u32>,
    /// Versions the input already satisfied
    pub satisfied: SatisfiedVersions,
}

impl MigrationOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Brings documents of one family up to the latest registered schema version
#[derive(Debug, Clone, Copy)]
pub struct MigrationEngine<'f> {
    family: &'f DocumentFamily,
}

impl<'f> MigrationEngine<'f> {
    pub fn new(family: &'f DocumentFamily) -> Self {
        Self { family }
    }

    pub fn family(&self) -> &'f DocumentFamily {
        self.family
    }

    pub fn plan(&self, document: &Document) -> Result<MigrationPlan, MigrationError> {
        let family_name = self.family.kind().as_str();
        let resolution = self.family.resolver().resolve(family_name, document)?;

        let steps = self.family.steps();
        let outstanding = steps
            .outstanding(&resolution.satisfied)
            .iter()
            .map(|step| step.version())
            .collect();

        let unknown = match (&resolution.satisfied, steps.latest()) {
            (SatisfiedVersions::Explicit(versions), Some(latest)) => {
                versions.iter().copied().filter(|v| *v > latest).collect()
            }
            _ => Vec::new(),
        };

        Ok(MigrationPlan {
            resolution,
            outstanding,
            unknown,
        })
    }

    /// Run every outstanding step against `document`.
    ///
    /// The outstanding set is computed once up front. When anything ran, the new satisfied
    /// set is stamped into the document so a second run finds nothing to do. On error the
    /// intermediate document is dropped.
    pub fn migrate(&self, document: Document) -> Result<MigrationOutcome, MigrationError> {
        let plan = self.plan(&document)?;
        let family_name = self.family.kind().as_str();

        if !plan.unknown.is_empty() {
            warn!(
                "{} document records migrations newer than this build supports: {}",
                family_name,
                format_version_list(plan.unknown.iter())
            );
        }

        if plan.is_current() {
            debug!("{} document is already current", family_name);
            return Ok(MigrationOutcome {
                document,
                applied: Vec::new(),
                satisfied: plan.resolution.satisfied,
            });
        }

        let legacy_marker = document.get(self.family.fields().legacy_version).cloned();
        let mut document = document;
        let mut applied = Vec::with_capacity(plan.outstanding.len());

        for step in self.family.steps().outstanding(&plan.resolution.satisfied) {
            info!(
                "Applying {} migration V{}: {}",
                family_name,
                step.version(),
                step.description()
            );
            document = step.apply(document)?;
            applied.push(step.version());
        }

        let recorded = plan
            .resolution
            .satisfied
            .recorded_with(&self.family.steps().versions(), &applied);
        self.stamp(
            &mut document,
            format_version_list(recorded.iter()),
            legacy_marker.as_ref(),
        );

        info!(
            "Migrated {} document through {}",
            family_name,
            applied.iter().map(|v| format!("V{}", v)).join(", ")
        );

        Ok(MigrationOutcome {
            document,
            applied,
            satisfied: plan.resolution.satisfied,
        })
    }

    /// Record the satisfied set where the highest-priority strategy will find it.
    ///
    /// `legacy_marker` is the root legacy field as it was before any step ran. Promotion
    /// carries it into the content object, where it is dropped along with the root copy.
    fn stamp(&self, document: &mut Document, recorded: String, legacy_marker: Option<&Value>) {
        let fields = self.family.fields();

        document.remove(fields.legacy_version);

        if let Some(content) = document.object_mut(fields.content) {
            if legacy_marker.is_some() && content.get(fields.legacy_version) == legacy_marker {
                content.shift_remove(fields.legacy_version);
            }
            content.insert(fields.migrations.to_string(), Value::String(recorded));
            document.remove(fields.migrations);
        } else {
            document.insert(fields.migrations, Value::String(recorded));
        }
    }
}
