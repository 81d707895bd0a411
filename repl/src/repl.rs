//! Core REPL state and execution.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use cdg_session::{Action, Editor, EditorConfig, Outcome};

use crate::executor::{
    execute_audit, execute_copy, execute_link, execute_list, execute_move, execute_node,
    execute_open, execute_paint, execute_paste, execute_rm, execute_rule, execute_save,
    execute_set, execute_show, execute_trace, execute_unlink, Bindings,
};
use crate::format::{format_rules, print_help};
use crate::tokenize::tokenize;

/// REPL state.
pub struct Repl {
    editor: Editor,
    bindings: Bindings,
    clipboard: Option<String>,
    verbose: bool,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Repl {
    /// Create a new REPL instance.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(config),
            bindings: Bindings::new(),
            clipboard: None,
            verbose: false,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Print graph statistics.
    pub fn print_graph_stats(&self) {
        let graph = self.editor.graph();
        println!("Nodes: {}", graph.node_count());
        println!("Links: {}", graph.edge_count());
        println!("Rules: {}", graph.rules().len());
        let history = self.editor.history();
        println!("Undo: {}, Redo: {}", history.undo_len(), history.redo_len());
    }

    /// Execute a single command line.
    pub fn execute(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("--") {
            return Ok(String::new());
        }

        let words = tokenize(trimmed)?;
        let Some((command, args)) = words.split_first() else {
            return Ok(String::new());
        };

        match command.to_lowercase().as_str() {
            "node" => execute_node(&mut self.editor, &mut self.bindings, args),
            "link" => execute_link(&mut self.editor, &mut self.bindings, args, false),
            "link!" => execute_link(&mut self.editor, &mut self.bindings, args, true),
            "unlink" => execute_unlink(&mut self.editor, &mut self.bindings, args),
            "rm" => execute_rm(&mut self.editor, &mut self.bindings, args),
            "move" => execute_move(&mut self.editor, &mut self.bindings, args),
            "set" => execute_set(&mut self.editor, &mut self.bindings, args),
            "paint" => execute_paint(&mut self.editor, &mut self.bindings, args),
            "trace" => execute_trace(&mut self.editor, &mut self.bindings, args, false),
            "roots" => execute_trace(&mut self.editor, &mut self.bindings, args, true),
            "untrace" => self.simple(Action::ClearTrace, "Trace cleared"),
            "undo" => match self.editor.dispatch(Action::Undo).map_err(|e| e.to_string())? {
                Outcome::Undone(true) => Ok("Undone".to_string()),
                _ => Ok("Nothing to undo".to_string()),
            },
            "redo" => match self.editor.dispatch(Action::Redo).map_err(|e| e.to_string())? {
                Outcome::Redone(true) => Ok("Redone".to_string()),
                _ => Ok("Nothing to redo".to_string()),
            },
            "list" => Ok(execute_list(&self.editor, &self.bindings)),
            "show" => execute_show(&mut self.editor, &mut self.bindings, args),
            "copy" => {
                let (text, message) = execute_copy(&mut self.editor, &mut self.bindings, args)?;
                self.clipboard = Some(text);
                Ok(message)
            }
            "paste" => execute_paste(&mut self.editor, self.clipboard.as_deref()),
            "rules" => Ok(format_rules(self.editor.rules())),
            "rule" => execute_rule(&mut self.editor, args),
            "audit" => Ok(execute_audit(&self.editor, &self.bindings)),
            "new" => {
                self.bindings.clear();
                self.simple(Action::New, "New diagram")
            }
            "open" => execute_open(&mut self.editor, &mut self.bindings, args),
            "save" => execute_save(&mut self.editor, args),
            other => Err(format!("Unknown command: {} (try 'help')", other)),
        }
    }

    fn simple(&mut self, action: Action, message: &str) -> Result<String, String> {
        self.editor.dispatch(action).map_err(|e| e.to_string())?;
        Ok(message.to_string())
    }

    /// Run a file.
    pub fn run_file(&mut self, path: &Path) -> Result<(), String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

        println!("Loading: {}", path.display());

        self.run_script(&content)
    }

    /// Run a script, one command per line. Failing lines are reported and skipped.
    pub fn run_script(&mut self, content: &str) -> Result<(), String> {
        for (number, line) in content.lines().enumerate() {
            match self.execute(line) {
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                }
                Err(e) => {
                    eprintln!("Error (line {}): {}", number + 1, e);
                }
            }
        }
        Ok(())
    }

    /// Run the interactive REPL.
    pub fn interactive(&mut self) {
        println!("CDG REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type 'help' for commands, 'quit' to exit");
        println!();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            // Prompt; '*' marks unsaved changes
            let prompt = if self.editor.is_dirty() { "cdg*> " } else { "cdg> " };
            print!("{}", prompt);
            let _ = stdout.flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    break;
                }
            }

            let trimmed = line.trim();

            match trimmed.to_lowercase().as_str() {
                "quit" | "exit" | "\\q" => break,
                "help" | "\\h" => {
                    print_help();
                    continue;
                }
                "stats" | "\\s" => {
                    self.print_graph_stats();
                    continue;
                }
                "verbose" => {
                    self.verbose = !self.verbose;
                    println!("Verbose mode: {}", self.verbose);
                    continue;
                }
                _ => {}
            }

            if let Some(path) = trimmed.strip_prefix("\\i ") {
                if let Err(e) = self.run_file(Path::new(path.trim())) {
                    eprintln!("Error: {}", e);
                }
                continue;
            }

            match self.execute(trimmed) {
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                    if self.verbose {
                        self.print_graph_stats();
                    }
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }

        if self.editor.is_dirty() {
            println!("Unsaved changes discarded");
        }
    }
}
