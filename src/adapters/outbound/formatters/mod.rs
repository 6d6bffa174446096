/// Formatter adapters, one per security tool
mod audit_output;
mod npm_audit_formatter;
mod yarn_audit_formatter;

pub use audit_output::{map_severity, AuditAdvisory, AuditFinding, AuditParser};
pub use npm_audit_formatter::NpmAuditFormatter;
pub use yarn_audit_formatter::YarnAuditFormatter;
