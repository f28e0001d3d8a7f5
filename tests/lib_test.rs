//! Library integration tests.

use grc_flow::FlowError;

#[test]
fn error_types_are_public() {
    let err = FlowError::UnknownAgent {
        name: "auditor".into(),
    };
    assert!(err.to_string().contains("auditor"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> grc_flow::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use grc_flow::cli::{Cli, Commands};

    let cli = Cli::parse_from(["grcflow", "dry-run", "w.yml", "--json"]);

    if let Commands::DryRun(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected DryRun command");
    }
}

#[test]
fn agents_are_executable_units() {
    use grc_flow::agents::{AgentRole, EchoGenerator, SimpleAgent};
    use grc_flow::context::Context;
    use grc_flow::unit::ExecutableUnit;
    use std::sync::Arc;

    let agent = SimpleAgent::from_role(AgentRole::Generation, Arc::new(EchoGenerator::new()));
    assert_eq!(agent.name(), "Generation Agent");
    assert_eq!(agent.execute("Draft", &Context::new()).unwrap(), "Draft");
}
