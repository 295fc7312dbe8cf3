//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::{Result, bail};
use std::collections::BTreeSet;
use std::path::Path;

use super::args::{CheckArgs, InfoArgs, InitArgs, ListArgs, ShowArgs};
use crate::app::App;
use crate::config::{self, CONFIG_FILE_NAME};
use crate::domain::{ComponentId, LineageDirection, LineageQuery};
use crate::output::{self, OutputMode};
use crate::search::{ComponentFilter, search};

/// Resolve the query a `show` invocation asks for.
///
/// Missing direction and depth fall back to the configured defaults.
/// With `--strict`, a depth outside `1..=max-depth` is an error instead of
/// being adjusted by the traversal. An unknown root is not an error here;
/// the traversal reports it as a warning on an empty view.
pub(crate) fn resolve_query(app: &App, args: &ShowArgs) -> Result<LineageQuery> {
    let defaults = &app.config().defaults;
    let direction = args
        .direction
        .map_or(defaults.direction, LineageDirection::from);
    let depth = args.depth.unwrap_or(defaults.depth);

    if args.strict && !(1..=defaults.max_depth).contains(&depth) {
        bail!(
            "Depth must be between 1 and {} in strict mode, got {}",
            defaults.max_depth,
            depth
        );
    }

    Ok(LineageQuery::new(
        ComponentId::new(args.root.as_str()),
        direction,
        depth,
    ))
}

/// Build the component filter for a `list` invocation.
pub(crate) fn build_filter(args: &ListArgs) -> ComponentFilter {
    ComponentFilter {
        text: args.search.clone(),
        types: args.types.iter().map(|t| (*t).into()).collect::<BTreeSet<_>>(),
        environments: args
            .environments
            .iter()
            .map(|e| (*e).into())
            .collect::<BTreeSet<_>>(),
        failed_only: args.failed,
    }
}

/// Execute the init command
///
/// Writes to `config_path` when given, otherwise to `lineage.yaml` in
/// `working_dir`.
pub async fn execute_init(
    working_dir: &Path,
    config_path: Option<&Path>,
    dataset: Option<&Path>,
    args: &InitArgs,
) -> Result<()> {
    let path = working_dir.join(config_path.unwrap_or(Path::new(CONFIG_FILE_NAME)));
    let written = config::init(&path, dataset).await?;

    if !args.quiet {
        println!("Initialized lineage configuration");
        println!("  Config: {}", path.display());
        println!("  Dataset: {}", written.dataset.display());
    }
    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &mut App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let query = resolve_query(app, args)?;
    tracing::debug!(
        root = %args.root,
        direction = %query.direction,
        depth = query.depth,
        "Computing lineage view"
    );

    let view = app.session_mut().refresh(query);
    output::print_view(view, output_mode)?;
    Ok(())
}

/// Execute the list command
pub fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let filter = build_filter(args);
    let mut components = search(app.index(), &filter);
    if let Some(limit) = args.limit {
        components.truncate(limit);
    }

    output::print_components(&components, output_mode)?;
    Ok(())
}

/// Execute the check command
///
/// Fails when the dataset has integrity problems, unless `--no-fail` is set.
pub fn execute_check(app: &App, args: &CheckArgs, output_mode: OutputMode) -> Result<()> {
    let report = app.index().integrity_report();
    output::print_report(&report, output_mode)?;

    if !report.is_clean() && !args.no_fail {
        bail!(
            "Dataset {} has {} integrity problem(s)",
            app.dataset_path().display(),
            report.problem_count()
        );
    }
    Ok(())
}

/// Execute the info command
pub fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    output::print_stats(app.dataset_path(), &app.index().stats(), output_mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineageConfig;
    use crate::domain::{Component, ComponentType, Edge, EdgeType, Environment};
    use crate::graph::GraphIndex;
    use crate::warning::Warning;
    use crate::cli::types::{ComponentTypeArg, DirectionArg, EnvironmentArg};
    use std::path::PathBuf;

    fn app() -> App {
        let index = GraphIndex::build(
            vec![
                Component::new("db", ComponentType::Database, Environment::Production),
                Component::new("tbl", ComponentType::Table, Environment::PreProduction),
            ],
            vec![Edge::new("e1", "db", "tbl", EdgeType::References)],
        );
        App::new(LineageConfig::default(), PathBuf::from("lineage.json"), index)
    }

    fn show(root: &str, depth: Option<u32>, strict: bool) -> ShowArgs {
        ShowArgs {
            root: root.to_string(),
            direction: None,
            depth,
            strict,
        }
    }

    #[test]
    fn resolve_query_uses_config_defaults() {
        let query = resolve_query(&app(), &show("db", None, false)).unwrap();
        assert_eq!(query.direction, LineageDirection::Both);
        assert_eq!(query.depth, 2);
    }

    #[test]
    fn resolve_query_honors_arguments() {
        let mut args = show("tbl", Some(4), false);
        args.direction = Some(DirectionArg::Upstream);
        let query = resolve_query(&app(), &args).unwrap();
        assert_eq!(query.direction, LineageDirection::Upstream);
        assert_eq!(query.depth, 4);
    }

    #[test]
    fn lenient_mode_passes_zero_depth_through() {
        let query = resolve_query(&app(), &show("db", Some(0), false)).unwrap();
        assert_eq!(query.depth, 0);
        assert_eq!(query.effective_depth(), 1);
    }

    #[test]
    fn strict_mode_rejects_out_of_range_depth() {
        assert!(resolve_query(&app(), &show("db", Some(0), true)).is_err());
        assert!(resolve_query(&app(), &show("db", Some(6), true)).is_err());
        assert!(resolve_query(&app(), &show("db", Some(5), true)).is_ok());
    }

    #[test]
    fn unknown_root_shows_empty_view_with_warning() {
        let mut app = app();
        execute_show(&mut app, &show("ghost", None, false), OutputMode::Json).unwrap();

        let view = app.session_mut().current().unwrap();
        assert!(view.is_empty());
        assert_eq!(
            view.warnings,
            vec![Warning::UnknownRoot {
                root: ComponentId::new("ghost")
            }]
        );
    }

    #[tokio::test]
    async fn init_writes_config_in_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        execute_init(dir.path(), None, None, &InitArgs { quiet: true })
            .await
            .unwrap();

        let config = LineageConfig::load(&dir.path().join(CONFIG_FILE_NAME))
            .await
            .unwrap();
        assert_eq!(config, LineageConfig::default());
        assert!(
            execute_init(dir.path(), None, None, &InitArgs { quiet: true })
                .await
                .is_err()
        );
    }

    #[test]
    fn build_filter_converts_arguments() {
        let args = ListArgs {
            search: Some("bill".to_string()),
            types: vec![ComponentTypeArg::Table],
            environments: vec![EnvironmentArg::PreProduction],
            failed: true,
            limit: None,
        };
        let filter = build_filter(&args);
        assert_eq!(filter.text.as_deref(), Some("bill"));
        assert!(filter.types.contains(&ComponentType::Table));
        assert!(filter.environments.contains(&Environment::PreProduction));
        assert!(filter.failed_only);
    }

    #[test]
    fn check_passes_on_clean_dataset() {
        assert!(execute_check(&app(), &CheckArgs::default(), OutputMode::Json).is_ok());
    }

    #[test]
    fn check_fails_on_dangling_edge() {
        let index = GraphIndex::build(
            vec![Component::new("a", ComponentType::Table, Environment::Production)],
            vec![Edge::new("e1", "a", "missing", EdgeType::Reads)],
        );
        let app = App::new(LineageConfig::default(), PathBuf::from("x.json"), index);

        assert!(execute_check(&app, &CheckArgs::default(), OutputMode::Json).is_err());
        assert!(execute_check(&app, &CheckArgs { no_fail: true }, OutputMode::Json).is_ok());
    }
}
