use crate::{
    assets,
    cli::{report, CheckArgs, Cli, Commands, RunArgs, SelectArgs},
    config::{Config, Project, Settings},
    driver::{run_all, run_one, Report},
    error::{Error, Result},
    mapping::MappingTable,
    orchestrator::RunOptions,
    prompt::confirm,
    validation::validate_project,
};
use std::io::IsTerminal;
use std::path::Path;

/// Main CLI runner that dispatches the selected command
pub struct Runner {
    cli: Cli,
}

/// Immutable inputs shared by every project of one invocation.
struct RunContext {
    config: Config,
    settings: Settings,
    table: MappingTable,
}

impl Runner {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn run(self) -> Result<()> {
        match &self.cli.command {
            Commands::Init => self.init(),
            Commands::Run(args) => self.with_context(|ctx| self.replace(ctx, args)),
            Commands::DryRun(select) => self.with_context(|ctx| self.dry_run(ctx, select)),
            Commands::Check(args) => self.with_context(|ctx| self.check(ctx, args)),
            Commands::Validate(select) => self.with_context(|ctx| self.validate(ctx, select)),
        }
    }

    fn init(&self) -> Result<()> {
        Config::write_default(&self.cli.config)?;
        println!(
            "Default configuration written to {}. Edit it to add your projects and mappings.",
            self.cli.config.display()
        );
        Ok(())
    }

    /// Loads the configuration snapshot and hands it to `f`.
    ///
    /// A missing configuration file can be replaced by the default document
    /// when running interactively.
    fn with_context(&self, f: impl FnOnce(&RunContext) -> Result<()>) -> Result<()> {
        let config = match Config::load(&self.cli.config) {
            Ok(config) => config,
            Err(Error::ConfigNotFound { path }) => {
                return self.offer_default_config(&path);
            }
            Err(e) => return Err(e),
        };

        let table = MappingTable::load(&config.cdn_mappings);
        report::print_rejected(table.rejected());
        let settings = config.settings();

        f(&RunContext { config, settings, table })
    }

    fn offer_default_config(&self, path: &Path) -> Result<()> {
        let not_found = Error::ConfigNotFound { path: path.to_path_buf() };
        if !std::io::stdin().is_terminal() {
            return Err(not_found);
        }

        println!("{not_found}");
        if confirm(false, "Create a default configuration file now?")? {
            Config::write_default(path)?;
            println!(
                "Default configuration written to {}. Edit it and run again.",
                path.display()
            );
            Ok(())
        } else {
            Err(not_found)
        }
    }

    fn replace(&self, ctx: &RunContext, args: &RunArgs) -> Result<()> {
        if ctx.table.is_empty() {
            return Err(Error::NoActiveMappings);
        }
        let selected = self.select(ctx, &args.select)?;

        if !args.yes {
            if ctx.settings.dry_run_first {
                println!("Preview of the changes:\n");
                report::print_report(&execute(ctx, &selected, RunOptions::dry_run()));
                println!();
            }
            if !confirm(false, "This will modify template files. Continue?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }

        let report = execute(ctx, &selected, RunOptions::live(args.missing_assets()));
        report::print_report(&report);
        Ok(())
    }

    fn dry_run(&self, ctx: &RunContext, select: &SelectArgs) -> Result<()> {
        if ctx.table.is_empty() {
            return Err(Error::NoActiveMappings);
        }
        let selected = self.select(ctx, select)?;
        report::print_report(&execute(ctx, &selected, RunOptions::dry_run()));
        println!("This was a dry run. Use `run` to apply the changes.");
        Ok(())
    }

    fn check(&self, ctx: &RunContext, args: &CheckArgs) -> Result<()> {
        for project in self.select(ctx, &args.select)?.projects() {
            let report = assets::check(ctx.table.rules(), project.static_dir());
            report::print_assets(&project.id, &report);

            if args.placeholders && !report.ok() {
                let created = assets::create_placeholders(&report.missing());
                println!(
                    "Created {} placeholder file(s), {} failure(s).",
                    created.count(),
                    created.failed
                );
                println!("Placeholders are empty: replace them with the real downloaded files.\n");
            }
        }
        Ok(())
    }

    fn validate(&self, ctx: &RunContext, select: &SelectArgs) -> Result<()> {
        for project in self.select(ctx, select)?.projects() {
            let validation = validate_project(project, &ctx.table);
            report::print_validation(&project.id, &validation);
        }
        Ok(())
    }

    fn select(&self, ctx: &RunContext, select: &SelectArgs) -> Result<Selection> {
        match &select.project {
            Some(id) => Ok(Selection::Single(ctx.config.project(id)?)),
            None => {
                let projects = ctx.config.projects();
                if !projects.iter().any(|p| p.enabled) {
                    return Err(Error::NoEnabledProjects);
                }
                Ok(Selection::Enabled(projects))
            }
        }
    }
}

/// Projects chosen on the command line.
enum Selection {
    /// Explicitly named, processed even when disabled.
    Single(Project),
    /// Every project of the document; only the enabled ones are processed.
    Enabled(Vec<Project>),
}

impl Selection {
    fn projects(&self) -> Vec<&Project> {
        match self {
            Selection::Single(project) => vec![project],
            Selection::Enabled(projects) => projects.iter().filter(|p| p.enabled).collect(),
        }
    }
}

fn execute(ctx: &RunContext, selection: &Selection, options: RunOptions) -> Report {
    match selection {
        Selection::Single(project) => Report {
            results: vec![run_one(project, &ctx.table, &ctx.settings, options)],
        },
        Selection::Enabled(projects) => run_all(projects, &ctx.table, &ctx.settings, options),
    }
}

/// Main entry point for CLI execution
pub fn run(cli: Cli) -> Result<()> {
    Runner::new(cli).run()
}
