use crate::{Config, Error};
use derive_more::Display;
use kubegen_build::{Cancel, EmitError, EmittedFile, emit};
use kubegen_naming::DefaultNameSystem;
use kubegen_schema::{graph::Builder, node::SchemaFile};
use tracing::{debug, info};

///
/// Stage
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Stage {
    Scan,
    Classify,
    Emit,
}

///
/// Driver
///
/// Runs Build → Classify → Emit as a strict synchronous pipeline. Any
/// stage error aborts the run; cancellation is checked between stages and
/// once per type during emission. No partial output is ever returned.
///

#[derive(Debug, Default)]
pub struct Driver {
    config: Config,
    cancel: Cancel,
}

impl Driver {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancel: Cancel::new(),
        }
    }

    /// Replace the cancellation token, e.g. with one wired to the host's
    /// interrupt handling.
    #[must_use]
    pub fn with_cancel(mut self, cancel: Cancel) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle the host can trip to abort an in-flight run.
    #[must_use]
    pub fn cancel_token(&self) -> Cancel {
        self.cancel.clone()
    }

    pub fn run(&self, files: &[SchemaFile]) -> Result<Vec<EmittedFile>, Error> {
        self.checkpoint(Stage::Scan)?;
        let graph = Builder::build(files)?;
        debug!(nodes = graph.len(), "scanned descriptor set");

        self.checkpoint(Stage::Classify)?;
        let names = DefaultNameSystem::from_graph(&graph, &self.config.naming);
        let types = kubegen_build::classify(&graph, &names, &self.config.markers)?;

        self.checkpoint(Stage::Emit)?;
        let emitted = emit(&graph, &types, &self.cancel).map_err(|err| match err {
            EmitError::Cancelled => Error::Cancelled { stage: Stage::Emit },
            other => Error::Emit(other),
        })?;

        info!(files = emitted.len(), "generation completed");
        Ok(emitted)
    }

    fn checkpoint(&self, stage: Stage) -> Result<(), Error> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled { stage });
        }
        Ok(())
    }
}
