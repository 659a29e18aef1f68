use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `reg` binary.
#[derive(Debug, Parser)]
#[command(name = "reg", version, about = "Registrar - course prerequisites and enrollment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (overrides `database.path` from config)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{CourseCommands, EnrollmentCommands, PrereqCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "reg",
            "--format",
            "raw",
            "--limit",
            "10",
            "--verbose",
            "department",
            "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Department { .. }));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["reg", "course", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["reg", "--format", "xml", "course", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn prereq_add_takes_course_then_prerequisite() {
        let cli = Cli::try_parse_from(["reg", "prereq", "add", "crs-b", "crs-a"])
            .expect("cli should parse");
        let Commands::Prereq { action } = cli.command else {
            panic!("expected prereq command");
        };
        assert!(matches!(
            action,
            PrereqCommands::Add { course, prerequisite } if course == "crs-b" && prerequisite == "crs-a"
        ));
    }

    #[test]
    fn course_create_parses_optional_capacity() {
        let cli = Cli::try_parse_from([
            "reg",
            "course",
            "create",
            "--code",
            "CS101",
            "--name",
            "Intro",
            "--credits",
            "4",
            "--department",
            "dpt-1",
            "--semester",
            "Fall 2026",
        ])
        .expect("cli should parse");
        let Commands::Course {
            action: CourseCommands::Create { max_students, credits, .. },
        } = cli.command
        else {
            panic!("expected course create");
        };
        assert_eq!(max_students, None);
        assert_eq!(credits, 4);
    }

    #[test]
    fn enrollment_create_requires_both_ids() {
        assert!(Cli::try_parse_from(["reg", "enrollment", "create", "--student", "stu-1"]).is_err());
        let cli = Cli::try_parse_from([
            "reg", "enrollment", "create", "--student", "stu-1", "--course", "crs-1",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Enrollment {
                action: EnrollmentCommands::Create { .. }
            }
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["reg", "--db", "/tmp/demo.db", "student", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
    }

    #[test]
    fn course_list_takes_sql_filters() {
        let cli = Cli::try_parse_from([
            "reg",
            "course",
            "list",
            "--department-code",
            "cs",
            "--search",
            "intro",
            "--semester",
            "Fall 2026",
        ])
        .expect("cli should parse");
        let Commands::Course {
            action:
                CourseCommands::List {
                    department,
                    department_code,
                    search,
                    semester,
                    ..
                },
        } = cli.command
        else {
            panic!("expected course list");
        };
        assert_eq!(department, None);
        assert_eq!(department_code.as_deref(), Some("cs"));
        assert_eq!(search.as_deref(), Some("intro"));
        assert_eq!(semester.as_deref(), Some("Fall 2026"));
    }

    #[test]
    fn course_list_rejects_both_department_selectors() {
        let parsed = Cli::try_parse_from([
            "reg",
            "course",
            "list",
            "--department",
            "dpt-1",
            "--department-code",
            "CS",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn course_delete_takes_id() {
        let cli = Cli::try_parse_from(["reg", "course", "delete", "crs-1"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Course {
                action: CourseCommands::Delete { id }
            } if id == "crs-1"
        ));
    }
}
