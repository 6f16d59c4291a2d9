use std::env;
use std::io::Write;

use tracing::{debug, error, info, warn};

use crate::{
    core::{
        commands::CommandRegistry,
        config::{Config, ConfigPaths, ConfigStore},
        context::ExecutionContext,
        dispatch::{DispatchResult, Dispatcher, Streams},
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{HistoryFile, HistoryStore, LineEditor, LineReader, ReadOutcome, ShellHelper},
    process::{InterruptFlag, ProcessRunner},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    AwaitingInput,
    Terminated,
}

/// The read-eval loop. Owns the session's configuration, environment and
/// history; the dispatcher only borrows them per command.
pub struct Shell<R: LineReader, H: HistoryStore> {
    reader: R,
    history: H,
    dispatcher: Dispatcher,
    config: Config,
    context: ExecutionContext,
    streams: Streams,
    interrupt: InterruptFlag,
    highlighter: SyntaxHighlighter,
    state: SessionState,
    /// `PATH` as last handed to the reader for completion.
    search_path: Option<String>,
}

impl Shell<LineEditor, HistoryFile> {
    pub fn new(flags: &Flags, paths: ConfigPaths) -> Result<Self, ShellError> {
        let highlighter = SyntaxHighlighter::new();
        let store = ConfigStore::new(paths.config_path.clone());
        let config = store.load().unwrap_or_else(|e| {
            error!(error = %e, "could not load configuration, using defaults");
            eprintln!("{}", highlighter.highlight_error(&format!("dsh: {}; using defaults", e)));
            Config::default()
        });
        info!(path = %store.path().display(), aliases = config.aliases.len(), "configuration loaded");

        let context = ExecutionContext::from_process();
        let registry = CommandRegistry::standard(store);
        let helper = ShellHelper::new(registry.names(), &config.aliases, context.get("PATH"));

        let editor_config = rustyline::Config::builder()
            .max_history_size(config.history_length)?
            .auto_add_history(false)
            .build();
        let mut editor = LineEditor::with_config(editor_config)?;
        editor.set_helper(Some(helper));

        let history = HistoryFile::new(paths.history_path, config.history_length);

        let interrupt = InterruptFlag::new();
        interrupt.install()?;

        let dispatcher = Dispatcher::new(registry, ProcessRunner::new()).quiet(flags.is_set("quiet"));

        let mut shell = Shell::with_parts(
            editor,
            history,
            dispatcher,
            config,
            context,
            Streams::stdio(),
            interrupt,
        );
        shell.highlighter = highlighter;
        Ok(shell)
    }
}

impl<R: LineReader, H: HistoryStore> Shell<R, H> {
    pub fn with_parts(
        reader: R,
        history: H,
        dispatcher: Dispatcher,
        config: Config,
        context: ExecutionContext,
        streams: Streams,
        interrupt: InterruptFlag,
    ) -> Self {
        let search_path = context.get("PATH").map(str::to_string);
        Shell {
            reader,
            history,
            dispatcher,
            config,
            context,
            streams,
            interrupt,
            highlighter: SyntaxHighlighter::plain(),
            state: SessionState::Running,
            search_path,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Runs until `exit` or end of input, then flushes history.
    pub fn run(&mut self) -> Result<(), ShellError> {
        self.load_history();
        info!("session started");

        while self.state != SessionState::Terminated {
            self.step()?;
        }
        Ok(())
    }

    /// Reads one line and acts on it.
    pub fn step(&mut self) -> Result<SessionState, ShellError> {
        if self.state == SessionState::Terminated {
            return Ok(self.state);
        }

        self.state = SessionState::AwaitingInput;
        let prompt = prompt();
        self.interrupt.clear();

        let read = match self.reader.read_line(&prompt) {
            Ok(read) => read,
            Err(e) => {
                error!(error = %e, "reading input failed");
                self.terminate();
                return Err(e);
            }
        };

        // The editor reports ^C itself on a terminal; a signal flag raised
        // during the read means non-terminal input lost a line.
        let read = if self.interrupt.take() {
            let _ = writeln!(self.streams.out, "Interrupted!");
            ReadOutcome::Interrupted
        } else {
            read
        };

        match read {
            ReadOutcome::Interrupted => {
                debug!("prompt interrupted");
            }
            ReadOutcome::Eof => {
                let _ = writeln!(self.streams.out, "Exiting...");
                self.terminate();
            }
            ReadOutcome::Line(line) if line.trim().is_empty() => {}
            ReadOutcome::Line(line) => {
                self.state = SessionState::Running;
                self.eval(&line);
            }
        }
        Ok(self.state)
    }

    fn eval(&mut self, line: &str) {
        self.reader.remember(line);
        self.history.append(line);

        let result =
            self.dispatcher
                .dispatch_line(line, &self.config, &mut self.context, &mut self.streams);

        match result {
            DispatchResult::Terminate => self.terminate(),
            DispatchResult::ReplaceConfig(config) => self.replace_config(config),
            DispatchResult::Noop
            | DispatchResult::Completed
            | DispatchResult::External(_)
            | DispatchResult::Failed(_) => {}
        }
        self.sync_search_path();
    }

    fn sync_search_path(&mut self) {
        let path = self.context.get("PATH");
        if path == self.search_path.as_deref() {
            return;
        }
        debug!(path = path.unwrap_or_default(), "search path changed");
        self.reader.set_search_path(path);
        self.search_path = path.map(str::to_string);
    }

    fn replace_config(&mut self, config: Config) {
        self.history.set_capacity(config.history_length);
        self.reader.refresh(&config);
        self.config = config;
        info!(aliases = self.config.aliases.len(), "configuration reloaded");
    }

    fn load_history(&mut self) {
        match self.history.load() {
            Ok(lines) => {
                for line in &lines {
                    self.reader.remember(line);
                }
            }
            Err(e) => {
                warn!(error = %e, "could not load history");
                let _ = writeln!(self.streams.err, "dsh: {}", e);
            }
        }
    }

    /// Idempotent, so history is flushed exactly once.
    fn terminate(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        self.state = SessionState::Terminated;

        if let Err(e) = self.history.flush() {
            error!(error = %e, "could not save history");
            let _ = writeln!(self.streams.err, "{}", self.highlighter.highlight_error(&format!("dsh: {}", e)));
        }
        let _ = self.streams.out.flush();
        info!("session ended");
    }
}

fn prompt() -> String {
    match env::current_dir() {
        Ok(dir) => format!("{} $ ", dir.display()),
        Err(_) => "? $ ".to_string(),
    }
}
