//! Where a split's configuration comes from and where its summary goes.
//!
//! The pipeline in [`crate::splitter`] knows nothing about front ends. The
//! binary picks one with [`FrontEndKind::probe`] at startup.

use crate::chapters::OutputOrder;
use crate::splitter::{default_output_dir, SplitConfig, SplitSummary};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

pub trait FrontEnd {
    fn request_config(&mut self) -> Result<SplitConfig>;
    fn report(&mut self, summary: &SplitSummary) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEndKind {
    /// Everything came in on the command line
    Args,
    /// Ask on the terminal
    Prompt,
}

impl FrontEndKind {
    /// Pick a front end from what is available: command-line arguments
    /// first, then an interactive terminal.
    pub fn probe(has_source: bool, stdin_is_terminal: bool) -> Result<Self> {
        if has_source {
            Ok(FrontEndKind::Args)
        } else if stdin_is_terminal {
            Ok(FrontEndKind::Prompt)
        } else {
            bail!("No input PDF given and stdin is not a terminal to ask for one")
        }
    }

    pub fn probe_stdin(has_source: bool) -> Result<Self> {
        Self::probe(has_source, io::stdin().is_terminal())
    }
}

/// Values supplied on the command line, any of which may be missing.
#[derive(Debug, Clone, Default)]
pub struct SplitArgs {
    pub source: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub order: OutputOrder,
    pub selection: Option<String>,
}

pub fn build(kind: FrontEndKind, args: SplitArgs) -> Box<dyn FrontEnd> {
    match kind {
        FrontEndKind::Args => Box::new(ArgsFrontEnd::new(args)),
        FrontEndKind::Prompt => Box::new(PromptFrontEnd::new(
            io::stdin().lock(),
            io::stdout(),
            args,
        )),
    }
}

pub struct ArgsFrontEnd {
    args: SplitArgs,
}

impl ArgsFrontEnd {
    pub fn new(args: SplitArgs) -> Self {
        ArgsFrontEnd { args }
    }
}

impl FrontEnd for ArgsFrontEnd {
    fn request_config(&mut self) -> Result<SplitConfig> {
        let source = self
            .args
            .source
            .clone()
            .context("No input PDF given")?;
        let output_dir = self
            .args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&source));

        Ok(SplitConfig {
            source,
            output_dir,
            order: self.args.order,
            selection: self.args.selection.clone(),
        })
    }

    fn report(&mut self, summary: &SplitSummary) -> Result<()> {
        print!("{}", summary);
        Ok(())
    }
}

/// Line-oriented questions on a reader/writer pair, normally the terminal.
pub struct PromptFrontEnd<R, W> {
    input: R,
    output: W,
    defaults: SplitArgs,
}

impl<R: BufRead, W: Write> PromptFrontEnd<R, W> {
    pub fn new(input: R, output: W, defaults: SplitArgs) -> Self {
        PromptFrontEnd {
            input,
            output,
            defaults,
        }
    }

    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(d) => write!(self.output, "{} [{}]: ", question, d)?,
            None => write!(self.output, "{}: ", question)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed while asking for {}", question.to_lowercase());
        }

        // Paths dragged into a terminal often arrive quoted
        let answer = line.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string();
        Ok(match (answer.is_empty(), default) {
            (true, Some(d)) => d.to_string(),
            _ => answer,
        })
    }
}

impl<R: BufRead, W: Write> FrontEnd for PromptFrontEnd<R, W> {
    fn request_config(&mut self) -> Result<SplitConfig> {
        let source_default = self
            .defaults
            .source
            .as_ref()
            .map(|p| p.display().to_string());
        let source = loop {
            let answer = self.ask("Input PDF", source_default.as_deref())?;
            if !answer.is_empty() {
                break PathBuf::from(answer);
            }
        };

        let output_default = self
            .defaults
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&source))
            .display()
            .to_string();
        let output_dir = PathBuf::from(self.ask("Output folder", Some(output_default.as_str()))?);

        let order_default = self.defaults.order.to_string();
        let order = loop {
            let answer = self.ask("Output order (ascending/descending)", Some(order_default.as_str()))?;
            match OutputOrder::from_str(&answer, true) {
                Ok(order) => break order,
                Err(_) => writeln!(self.output, "Please answer ascending or descending.")?,
            }
        };

        let selection_default = self.defaults.selection.clone().unwrap_or_else(|| "all".into());
        let selection = self.ask("Chapters to write", Some(selection_default.as_str()))?;
        let selection = (!selection.eq_ignore_ascii_case("all")).then_some(selection);

        Ok(SplitConfig {
            source,
            output_dir,
            order,
            selection,
        })
    }

    fn report(&mut self, summary: &SplitSummary) -> Result<()> {
        write!(self.output, "{}", summary)?;
        self.output.flush()?;
        Ok(())
    }
}
