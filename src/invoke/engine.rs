use crate::foundation::error::{VizError, VizResult};
use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// External algorithm engine.
///
/// Takes the raw configuration text and returns the serialized frame array. What the input means
/// and how frames are produced is entirely up to the engine. Failures must come back as
/// [`VizError::Engine`].
pub trait Engine {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Run one invocation.
    fn run(&self, raw_input: &str) -> VizResult<String>;
}

/// Loaded engine, created once at startup and passed to
/// [`crate::invoke::boundary::InvocationBoundary::new`].
pub struct EngineHandle {
    engine: Box<dyn Engine>,
}

impl EngineHandle {
    /// Take ownership of an initialized engine.
    pub fn init(engine: impl Engine + 'static) -> Self {
        tracing::debug!(engine = engine.name(), "engine initialized");
        Self {
            engine: Box::new(engine),
        }
    }

    /// Engine name.
    pub fn name(&self) -> &str {
        self.engine.name()
    }

    /// Call the engine.
    #[tracing::instrument(skip(self, raw_input), fields(engine = self.engine.name(), input_len = raw_input.len()))]
    pub fn run(&self, raw_input: &str) -> VizResult<String> {
        self.engine.run(raw_input)
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// Adapter turning a closure into an [`Engine`].
pub struct FnEngine<F> {
    name: String,
    f: F,
}

impl<F> FnEngine<F>
where
    F: Fn(&str) -> VizResult<String>,
{
    /// Wrap `f` under `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Engine for FnEngine<F>
where
    F: Fn(&str) -> VizResult<String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, raw_input: &str) -> VizResult<String> {
        (self.f)(raw_input)
    }
}

/// Replays a recorded history file, ignoring the input.
#[derive(Clone, Debug)]
pub struct FileEngine {
    path: PathBuf,
    name: String,
}

impl FileEngine {
    /// Replay `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

impl Engine for FileEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _raw_input: &str) -> VizResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            VizError::engine(format!("read recorded history '{}': {e}", self.path.display()))
        })
    }
}

/// Options for [`CommandEngine`].
#[derive(Clone, Debug)]
pub struct CommandEngineOpts {
    /// Engine executable.
    pub program: PathBuf,
    /// Extra arguments passed before the input is written to stdin.
    pub args: Vec<String>,
    /// Working directory of the engine process. `None` inherits ours.
    pub working_dir: Option<PathBuf>,
}

impl CommandEngineOpts {
    /// Options for running `program` without arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }
}

/// Engine living in an external process.
///
/// Each invocation spawns `program`, writes the raw input to its stdin from a helper thread while
/// collecting stdout and stderr, then waits for the process to exit. A spawn error, non-zero exit
/// status or non-UTF-8 output is an engine failure carrying the process's stderr.
#[derive(Clone, Debug)]
pub struct CommandEngine {
    opts: CommandEngineOpts,
    name: String,
}

impl CommandEngine {
    /// Create an engine from options.
    pub fn new(opts: CommandEngineOpts) -> Self {
        let name = opts.program.display().to_string();
        Self { opts, name }
    }
}

impl Engine for CommandEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, raw_input: &str) -> VizResult<String> {
        let mut cmd = Command::new(&self.opts.program);
        cmd.args(&self.opts.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.opts.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| VizError::engine(format!("spawn engine '{}': {e}", self.name)))?;

        // stdin is fed concurrently with the stdout/stderr drain in `wait_with_output`.
        let feeder = child.stdin.take().map(|mut stdin| {
            let input = raw_input.to_owned();
            std::thread::spawn(move || match stdin.write_all(input.as_bytes()) {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            })
        });

        let output = child
            .wait_with_output()
            .map_err(|e| VizError::engine(format!("wait for engine '{}': {e}", self.name)))?;

        let fed = match feeder {
            Some(feeder) => feeder
                .join()
                .map_err(|_| VizError::engine("engine stdin writer thread panicked"))?,
            None => Ok(()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VizError::engine(format!(
                "engine '{}' exited with {}: {}",
                self.name,
                output.status,
                stderr.trim()
            )));
        }

        fed.map_err(|e| VizError::engine(format!("write engine stdin: {e}")))?;

        String::from_utf8(output.stdout)
            .map_err(|e| VizError::engine(format!("engine output is not UTF-8: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/invoke/engine.rs"]
mod tests;
