use super::*;

#[test]
fn parses_run_with_scraper_name() {
    let cli = Cli::try_parse_from(["augips", "run", "autozone"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Run { ref target, debug: false } if target == "autozone"
    ));
}

#[test]
fn parses_run_all_with_debug() {
    let cli =
        Cli::try_parse_from(["augips", "run", "all", "--debug"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Run { ref target, debug: true } if target == "all"
    ));
    assert!(cli.command.debug());
}

#[test]
fn parses_run_list() {
    let cli = Cli::try_parse_from(["augips", "run", "list"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Run { ref target, .. } if target == "list"
    ));
}

#[test]
fn parses_inspect() {
    let cli = Cli::try_parse_from(["augips", "inspect", "ikea", "--debug"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Inspect { ref name, debug: true } if name == "ikea"
    ));
}

#[test]
fn run_requires_target() {
    assert!(Cli::try_parse_from(["augips", "run"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["augips"]).is_err());
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(Cli::try_parse_from(["augips", "run", "simple", "--verbose"]).is_err());
}

#[tokio::test]
async fn run_list_prints_names_without_scraping() {
    let config = augips_core::AppConfig::default();
    run::run(&config, "list", false)
        .await
        .expect("list should succeed");
}

#[tokio::test]
async fn run_unknown_scraper_is_an_error() {
    let config = augips_core::AppConfig::default();
    let err = run::run(&config, "walmart", false)
        .await
        .expect_err("unknown name should fail");
    let message = err.to_string();
    assert!(message.contains("unknown scraper 'walmart'"), "got: {message}");
    assert!(message.contains("simple"), "available names listed: {message}");
}

#[tokio::test]
async fn inspect_unknown_scraper_is_an_error() {
    let config = augips_core::AppConfig::default();
    let err = run::inspect(&config, "walmart", false)
        .await
        .expect_err("unknown name should fail");
    assert!(err.to_string().contains("unknown scraper 'walmart'"));
}
