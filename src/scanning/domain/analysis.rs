use super::{AnalysisStatus, ScanError, ScanErrorKind, Severity, Vulnerability};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Repository and company an analysis belongs to.
///
/// Fixed when the analysis is created; `Analysis` exposes no setters for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisScope {
    pub repository_id: Uuid,
    pub repository_name: String,
    pub company_id: Uuid,
    pub company_name: String,
}

impl AnalysisScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, id: Uuid, name: impl Into<String>) -> Self {
        self.repository_id = id;
        self.repository_name = name.into();
        self
    }

    pub fn with_company(mut self, id: Uuid, name: impl Into<String>) -> Self {
        self.company_id = id;
        self.company_name = name.into();
        self
    }
}

/// Aggregate root of one scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    id: Uuid,
    #[serde(rename = "repositoryID")]
    repository_id: Uuid,
    repository_name: String,
    #[serde(rename = "companyID")]
    company_id: Uuid,
    company_name: String,
    status: AnalysisStatus,
    errors: String,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    vulnerabilities: Vec<Vulnerability>,
    #[serde(skip)]
    error_kinds: Vec<ScanErrorKind>,
}

impl Analysis {
    pub fn new(scope: AnalysisScope) -> Self {
        Self {
            id: Uuid::new_v4(),
            repository_id: scope.repository_id,
            repository_name: scope.repository_name,
            company_id: scope.company_id,
            company_name: scope.company_name,
            status: AnalysisStatus::Pending,
            errors: String::new(),
            created_at: Utc::now(),
            finished_at: None,
            vulnerabilities: Vec::new(),
            error_kinds: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn repository_id(&self) -> Uuid {
        self.repository_id
    }

    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    pub fn company_id(&self) -> Uuid {
        self.company_id
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn errors(&self) -> &str {
        &self.errors
    }

    /// Kinds of the structured errors recorded through `record_scan_error`
    pub fn error_kinds(&self) -> &[ScanErrorKind] {
        &self.error_kinds
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn total_vulnerabilities(&self) -> usize {
        self.vulnerabilities.len()
    }

    /// Moves a pending analysis into `Running`; terminal analyses are left alone
    pub fn mark_running(&mut self) {
        if self.status == AnalysisStatus::Pending {
            self.status = AnalysisStatus::Running;
        }
    }

    /// Appends an error message, joining with `", "`. `None` is a no-op.
    pub fn record_error(&mut self, error: Option<&dyn fmt::Display>) {
        let Some(error) = error else {
            return;
        };

        if self.errors.is_empty() {
            self.errors = error.to_string();
        } else {
            self.errors.push_str(", ");
            self.errors.push_str(&error.to_string());
        }
    }

    /// Records a taxonomy error, keeping its kind alongside the message.
    ///
    /// `ProvenanceUnavailable` never reaches the error text.
    pub fn record_scan_error(&mut self, error: &ScanError) {
        if !error.is_accumulated() {
            return;
        }
        self.error_kinds.push(error.kind());
        self.record_error(Some(error));
    }

    pub fn append_vulnerabilities(&mut self, vulnerabilities: Vec<Vulnerability>) {
        self.vulnerabilities.extend(vulnerabilities);
    }

    /// Points every record at this analysis and gives it a fresh identifier
    pub fn stamp_identities(&mut self) {
        for vulnerability in &mut self.vulnerabilities {
            vulnerability.analysis_id = self.id;
            vulnerability.vulnerability_id = Uuid::new_v4();
        }
    }

    /// Sets `finished_at` and the terminal status.
    ///
    /// Not idempotent: a second call moves `finished_at` and re-derives the status.
    pub fn finalize(&mut self) -> &mut Self {
        self.finished_at = Some(Utc::now());
        self.status = if self.has_errors() {
            AnalysisStatus::Error
        } else {
            AnalysisStatus::Success
        };
        self
    }

    pub fn count_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut totals: BTreeMap<Severity, usize> =
            Severity::ALL.into_iter().map(|s| (s, 0)).collect();
        for vulnerability in &self.vulnerabilities {
            *totals.entry(vulnerability.severity).or_insert(0) += 1;
        }
        totals
    }

    /// Groups records by severity, most critical first.
    ///
    /// `sort_by_key` is stable, so records keep their relative order inside
    /// each severity bucket.
    pub fn sort_by_criticality(&mut self) -> &mut Self {
        self.vulnerabilities.sort_by_key(|v| v.severity);
        self
    }

    /// Keyed representation of the analysis
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(self.id));
        map.insert("createdAt".to_string(), json!(self.created_at));
        map.insert("repositoryID".to_string(), json!(self.repository_id));
        map.insert("repositoryName".to_string(), json!(self.repository_name));
        map.insert("companyID".to_string(), json!(self.company_id));
        map.insert("companyName".to_string(), json!(self.company_name));
        map.insert("status".to_string(), json!(self.status));
        map.insert("errors".to_string(), json!(self.errors));
        map.insert("finishedAt".to_string(), json!(self.finished_at));
        map.insert("vulnerabilities".to_string(), json!(self.vulnerabilities));
        map
    }
}
