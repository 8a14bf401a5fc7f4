use spotcon::{
    CliError, PROGRAM_NAME,
    cli::{self, SHELLS},
    command::{Action, CommandSpec, FlagValue, Parsed, Positionals, Registry},
};

fn tokens(line: &str) -> Vec<String> {
    let mut tokens = vec![PROGRAM_NAME.to_string()];
    tokens.extend(spotcon::utils::tokenize(line));
    tokens
}

fn run(registry: &Registry, line: &str) -> spotcon::command::Invocation {
    match registry.parse(&tokens(line)) {
        Ok(Parsed::Run(inv)) => inv,
        other => panic!("expected an invocation for '{}', got {:?}", line, other),
    }
}

#[test]
fn test_every_name_and_alias_finds_its_command() {
    let registry = cli::registry().unwrap();

    for spec in registry.commands() {
        for name in spec.names() {
            assert_eq!(registry.lookup(name).unwrap().name, spec.name);
        }
    }

    assert_eq!(registry.lookup("pp").unwrap().action, Action::Pause);
    assert_eq!(registry.lookup("pr").unwrap().action, Action::Prev);
    assert_eq!(registry.lookup("clc").unwrap().action, Action::Clear);
}

#[test]
fn test_lookup_is_exact() {
    let registry = cli::registry().unwrap();

    assert!(matches!(
        registry.lookup("PLAY"),
        Err(CliError::UnknownCommand(name)) if name == "PLAY"
    ));
    assert!(registry.lookup("pla").is_err());
    assert!(registry.lookup("").is_err());
}

#[test]
fn test_commands_are_sorted() {
    let registry = cli::registry().unwrap();
    let names: Vec<_> = registry.commands().map(|c| c.name).collect();

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 16);
    assert_eq!(registry.len(), 16);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut registry = cli::registry().unwrap();

    let clash = CommandSpec::new("prefix", "clashes on alias", Action::Next).aliases(&["p"]);
    assert!(matches!(
        registry.register(clash),
        Err(CliError::DuplicateCommand(name)) if name == "p"
    ));

    let clash = CommandSpec::new("pause", "clashes on name", Action::Pause);
    assert!(matches!(
        registry.register(clash),
        Err(CliError::DuplicateCommand(_))
    ));

    let mut empty = Registry::new();
    let repeated = CommandSpec::new("x", "alias repeats name", Action::Quit).aliases(&["x"]);
    assert!(empty.register(repeated).is_err());
    assert!(empty.is_empty());
}

#[test]
fn test_clap_definitions_are_consistent() {
    let registry = cli::registry().unwrap();

    for spec in registry.commands() {
        spec.to_clap().debug_assert();
    }
    registry.root_command().debug_assert();
}

#[test]
fn test_quoted_free_text_stays_one_word() {
    let registry = cli::registry().unwrap();
    let inv = run(&registry, "play \"Bad Blood\" --artist");

    assert_eq!(inv.action, Action::Play);
    assert_eq!(inv.args, vec!["Bad Blood".to_string()]);
    assert!(inv.flag_bool("artist"));
    assert!(!inv.flag_bool("track"));
    assert!(inv.is_set("artist"));
    assert!(!inv.is_set("track"));
}

#[test]
fn test_defaults_are_filled_in() {
    let registry = cli::registry().unwrap();
    let inv = run(&registry, "s yesterday once more");

    assert_eq!(inv.command, "search");
    assert_eq!(inv.text(), "yesterday once more");
    assert_eq!(inv.flags.get("track"), Some(&FlagValue::Bool(false)));
    assert!(inv.provided.is_empty());
}

#[test]
fn test_valued_flags() {
    let registry = cli::registry().unwrap();

    let inv = run(&registry, "opt -r track --shuffle on");
    assert_eq!(inv.flag_str("repeat"), Some("track"));
    assert_eq!(inv.flag_str("shuffle"), Some("on"));

    let inv = run(&registry, "vol --set -5");
    assert_eq!(inv.flag_int("set"), Some(-5));

    let inv = run(&registry, "vol set -20");
    assert_eq!(inv.args, vec!["set".to_string(), "-20".to_string()]);
}

#[test]
fn test_positional_policies_are_enforced() {
    let registry = cli::registry().unwrap();

    let invalid = [
        "pause now",
        "search",
        "search --track",
        "repeat sometimes",
        "repeat",
        "shuffle maybe",
        "seek ff 10 20",
        "help play pause",
        "vol --set loud",
        "completions tcsh",
        "next --force",
    ];

    for line in invalid {
        match registry.parse(&tokens(line)) {
            Err(e) => assert!(e.is_usage(), "'{}' gave {:?}", line, e),
            Ok(parsed) => panic!("'{}' should be rejected, got {:?}", line, parsed),
        }
    }
}

#[test]
fn test_one_of_words_ignore_case() {
    let registry = cli::registry().unwrap();

    assert_eq!(run(&registry, "repeat PlayList").text().to_lowercase(), "playlist");
    assert_eq!(run(&registry, "completions zsh").text(), "zsh");
    assert!(SHELLS.contains(&"bash"));
}

#[test]
fn test_help_is_returned_instead_of_running() {
    let registry = cli::registry().unwrap();

    match registry.parse(&tokens("play -h")) {
        Ok(Parsed::Help(text)) => assert!(text.contains("--device")),
        other => panic!("expected help, got {:?}", other),
    }

    assert!(registry.help("v").unwrap().contains("--set"));
    assert!(registry.help("nope").is_err());
}

#[test]
fn test_usage_lists_every_command() {
    let registry = cli::registry().unwrap();
    let usage = registry.usage();

    for spec in registry.commands() {
        assert!(usage.contains(spec.about), "missing {}", spec.name);
    }
    assert!(usage.contains("play, p"));
}

#[test]
fn test_custom_registry() {
    let mut registry = Registry::new();
    registry
        .register(
            CommandSpec::new("echo", "prints", Action::Help)
                .aliases(&["e"])
                .positionals(Positionals::Exactly(2, "A B")),
        )
        .unwrap();

    assert_eq!(run(&registry, "e one two").args.len(), 2);
    assert!(registry.parse(&tokens("echo one")).is_err());
    assert!(registry.parse(&tokens("echo one two three")).is_err());
}
