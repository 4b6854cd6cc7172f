//! The multi-phase session.

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, warn};
use uht_diagnostic::{Diagnostic, DiagnosticQueue};
use uht_parse::resolve::{bind_bases, resolve_final, resolve_properties, validate};
use uht_parse::{parse_header, ModuleKind, ParseConfig};
use uht_types::{HeaderFile, HeaderId, TypeTable};

use crate::intrinsics::{INTRINSIC_HEADER, INTRINSIC_SOURCE};

/// Settings for one run.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// `WITH_EDITOR` is enabled.
    pub editor: bool,
    pub module_kind: ModuleKind,
    /// Run per-header phases on the rayon pool.
    pub parallel: bool,
    /// Count warnings as errors when deciding whether a phase failed.
    pub warnings_as_errors: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            editor: true,
            module_kind: ModuleKind::Runtime,
            parallel: true,
            warnings_as_errors: false,
        }
    }
}

impl SessionConfig {
    /// The per-header projection handed to the parser.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig {
            editor: self.editor,
            module_kind: self.module_kind,
        }
    }
}

/// A global phase barrier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Parse,
    BindBases,
    ResolveProperties,
    ResolveFinal,
    Validate,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Parse => "parse",
            Phase::BindBases => "bind bases",
            Phase::ResolveProperties => "resolve properties",
            Phase::ResolveFinal => "resolve final",
            Phase::Validate => "validate",
        })
    }
}

/// The run failed; no phase after `phase` was started.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{errors} errors after {phase}")]
pub struct SessionError {
    pub phase: Phase,
    pub errors: usize,
}

/// Every header of a run plus the shared type table.
pub struct Session {
    config: SessionConfig,
    types: TypeTable,
    headers: Vec<HeaderFile>,
    diagnostics: DiagnosticQueue,
}

impl Session {
    /// A session holding only the intrinsic header.
    pub fn new(config: SessionConfig) -> Self {
        let diagnostics = DiagnosticQueue::new().with_warnings_as_errors(config.warnings_as_errors);
        let mut session = Session {
            config,
            types: TypeTable::new(),
            headers: Vec::new(),
            diagnostics,
        };
        session.add_header(INTRINSIC_HEADER, INTRINSIC_SOURCE);
        session
    }

    /// Queue a header for the next [`run`](Self::run).
    pub fn add_header(&mut self, path: impl Into<String>, source: impl Into<String>) -> HeaderId {
        let id = HeaderId(u32::try_from(self.headers.len()).unwrap_or(u32::MAX));
        self.headers.push(HeaderFile::new(id, path, source));
        id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// All headers, indexed by [`HeaderId`]; the intrinsic header is first.
    pub fn headers(&self) -> &[HeaderFile] {
        &self.headers
    }

    pub fn header(&self, path: &str) -> Option<&HeaderFile> {
        self.headers.iter().find(|header| header.path == path)
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    /// Every diagnostic recorded so far, ordered by header path and line.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.flush()
    }

    /// Run every phase, stopping after the first one that records errors.
    #[tracing::instrument(level = "debug", skip_all, fields(headers = self.headers.len()))]
    pub fn run(&mut self) -> Result<(), SessionError> {
        self.parse();
        self.barrier(Phase::Parse)?;

        bind_bases(&mut self.headers, &self.types);
        self.barrier(Phase::BindBases)?;

        self.for_each_header(resolve_properties);
        self.barrier(Phase::ResolveProperties)?;

        self.for_each_header(resolve_final);
        self.barrier(Phase::ResolveFinal)?;

        self.validate();
        self.barrier(Phase::Validate)?;

        info!(
            headers = self.headers.len(),
            types = self.types.len(),
            warnings = self.diagnostics.warning_count(),
            "session complete"
        );
        Ok(())
    }

    fn parse(&mut self) {
        let config = self.config.parse_config();
        let types = &self.types;
        let headers = std::mem::take(&mut self.headers);
        self.headers = if self.config.parallel {
            headers
                .into_par_iter()
                .map(|header| parse_header(&config, types, header))
                .collect()
        } else {
            headers
                .into_iter()
                .map(|header| parse_header(&config, types, header))
                .collect()
        };
        debug!(types = self.types.len(), "headers parsed");
    }

    fn for_each_header(&mut self, phase: impl Fn(&mut HeaderFile, &TypeTable) + Sync) {
        let types = &self.types;
        if self.config.parallel {
            self.headers
                .par_iter_mut()
                .for_each(|header| phase(header, types));
        } else {
            for header in &mut self.headers {
                phase(header, types);
            }
        }
    }

    fn validate(&mut self) {
        let headers = &self.headers;
        let found: Vec<Vec<Diagnostic>> = if self.config.parallel {
            headers
                .par_iter()
                .map(|header| validate(header, headers))
                .collect()
        } else {
            headers
                .iter()
                .map(|header| validate(header, headers))
                .collect()
        };
        self.diagnostics.extend(found.into_iter().flatten());
    }

    /// Move header diagnostics into the queue and stop on failure.
    fn barrier(&mut self, phase: Phase) -> Result<(), SessionError> {
        for header in &mut self.headers {
            self.diagnostics.extend(header.diagnostics.drain(..));
        }
        let errors = self.diagnostics.failure_count();
        if errors > 0 {
            warn!(%phase, errors, "stopping after failed phase");
            return Err(SessionError { phase, errors });
        }
        debug!(%phase, "phase complete");
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
