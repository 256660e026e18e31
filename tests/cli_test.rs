//! Tests for command dispatch on files

use std::path::Path;

use clap::Parser;
use flattree::application::{ConversionService, Input};
use flattree::cli::{execute_command, Cli, CliError};
use flattree::config::Settings;
use flattree::util::testing;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const FLAT: &str = r#"[
    {"id":"r","name":"Root"},
    {"id":"c","parentId":"r","name":"Gamma","rank":1},
    {"id":"a","parentId":"r","name":"Alpha","rank":3},
    {"id":"b","parentId":"r","rank":2}
]"#;

#[fixture]
fn workspace() -> TempDir {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("flat.json"), FLAT).unwrap();
    temp
}

fn run(dir: &Path, args: &[&str]) -> Result<(), CliError> {
    let mut argv = vec!["flattree".to_string(), "-C".into(), dir.display().to_string()];
    argv.extend(args.iter().map(|a| a.to_string()));
    execute_command(&Cli::parse_from(argv))
}

#[rstest]
#[case::sorted_by_id("build", &["--sort", "id"])]
#[case::sorted_by_rank_and_releveled("build", &["-s", "rank", "--relevel"])]
#[case::labelled_by_name("show", &["--flat", "--label", "name"])]
#[case::labelled_by_number("show", &["--flat", "-l", "rank"])]
fn given_flat_file_when_running_command_then_succeeds(
    workspace: TempDir,
    #[case] command: &str,
    #[case] options: &[&str],
) {
    let file = workspace.path().join("flat.json").display().to_string();
    let mut args = vec![command, file.as_str()];
    args.extend_from_slice(options);

    run(workspace.path(), &args).unwrap();
}

#[rstest]
fn given_missing_file_when_building_then_noinput(workspace: TempDir) {
    let missing = workspace.path().join("missing.json");
    let err = run(workspace.path(), &["build", &missing.display().to_string()]).unwrap_err();
    assert_eq!(err.exit_code(), flattree::exitcode::NOINPUT);
}

#[rstest]
fn given_local_init_when_run_twice_then_second_is_usage_error(workspace: TempDir) {
    run(workspace.path(), &["config", "init"]).unwrap();
    assert!(workspace.path().join(".flattree.toml").exists());

    let err = run(workspace.path(), &["config", "init"]).unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
}

#[rstest]
fn given_flat_file_when_building_with_sort_key_then_siblings_ordered(workspace: TempDir) {
    let service = ConversionService::new(Settings::default());
    let nodes = service
        .read_nodes(&Input::File(workspace.path().join("flat.json")))
        .unwrap();

    let by_name = service.build(nodes.clone(), Some("name"), None).unwrap();
    let by_rank = service.build(nodes, Some("rank"), None).unwrap();

    let ids = |roots: &[flattree::Node]| -> Vec<String> {
        roots[0]
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.id.clone())
            .collect()
    };
    // missing attribute sorts last
    assert_eq!(ids(&by_name), vec!["a", "c", "b"]);
    assert_eq!(ids(&by_rank), vec!["c", "b", "a"]);
}
