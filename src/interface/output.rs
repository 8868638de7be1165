use crate::generators::GenerationReport;
use crate::interface::config::GenerateConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Verbose => write!(f, "VERBOSE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Logger {
    verbose: bool,
    debug: bool,
}

impl Logger {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Self { verbose, debug }
    }

    pub fn from_config(config: &GenerateConfig) -> Self {
        Self::new(config.is_verbose(), false)
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Error | LogLevel::Warning | LogLevel::Info => true,
            LogLevel::Debug => self.debug || self.verbose,
            LogLevel::Verbose => self.verbose,
        }
    }

    pub fn format(level: LogLevel, message: &str) -> String {
        let icon = match level {
            LogLevel::Error => "❌",
            LogLevel::Warning => "⚠️",
            LogLevel::Info => "",
            LogLevel::Debug => "🔍",
            LogLevel::Verbose => "💬",
        };
        if icon.is_empty() {
            message.to_string()
        } else {
            format!("{} {}", icon, message)
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.should_log(level) {
            return;
        }
        let line = Self::format(level, message);
        // errors and warnings go to stderr
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Step-by-step progress of a run: a spinner normally, one line per step in verbose mode
pub struct ProgressReporter {
    logger: Logger,
    progress_bar: Option<ProgressBar>,
    current_step: usize,
    total_steps: usize,
    step_name: String,
}

impl ProgressReporter {
    pub fn new(logger: Logger, total_steps: usize) -> Self {
        let progress_bar = if logger.is_verbose() {
            None
        } else {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
            pb.set_style(style);
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        };

        Self {
            logger,
            progress_bar,
            current_step: 0,
            total_steps,
            step_name: String::new(),
        }
    }

    fn step_label(&self) -> String {
        if self.total_steps > 0 {
            format!("{} ({}/{})", self.step_name, self.current_step, self.total_steps)
        } else {
            self.step_name.clone()
        }
    }

    pub fn start_step(&mut self, step_name: &str) {
        self.current_step += 1;
        self.step_name = step_name.to_string();

        match self.progress_bar {
            Some(ref pb) => pb.set_message(self.step_label()),
            None => self.logger.info(&format!("🚀 {}", self.step_label())),
        }
    }

    pub fn complete_step(&mut self, message: Option<&str>) {
        if !self.logger.is_verbose() {
            return;
        }
        match message {
            Some(msg) => self.logger.info(&format!("✅ {} - {}", self.step_name, msg)),
            None => self.logger.info(&format!("✅ {}", self.step_name)),
        }
    }

    pub fn fail_step(&mut self, error: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
        self.logger
            .error(&format!("Failed {}: {}", self.step_name, error));
    }

    pub fn update_progress(&self, message: &str) {
        self.logger.verbose(message);
    }

    pub fn finish(&self, total_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
        println!("✓ {}", total_message);
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

pub fn print_generation_summary(source_path: &str, report: &GenerationReport) {
    println!(
        "\n✓ Scaffolded {} domain{}",
        report.domains.len(),
        if report.domains.len() == 1 { "" } else { "s" }
    );
    println!("📁 Location: {}", source_path);

    for domain in &report.domains {
        println!(
            "  • {} → /{}",
            domain.capitalized_name(),
            domain.controller_path()
        );
    }

    if !report.skipped.is_empty() {
        println!(
            "\n⏭️  Kept {} existing file{} (use --force to regenerate)",
            report.skipped.len(),
            if report.skipped.len() == 1 { "" } else { "s" }
        );
    }

    if report.registry.is_some() {
        println!("\n💡 Register the generated modules:");
        println!("  import {{ controllers, services, models }} from './registry'");
    }
}

pub fn print_init_info(template_dir: &str, config_path: &str) {
    println!("\n✓ Project initialized");
    println!("  📄 Templates: {}", template_dir);
    println!("  📄 Configuration: {}", config_path);
    println!("\n💡 Add interfaces under <source>/interfaces and run: crud-scaffold generate");
}
