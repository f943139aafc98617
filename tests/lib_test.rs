//! Library integration tests.

use cloudctx::{ContextError, IdentityError};

#[test]
fn error_types_are_public() {
    let err = ContextError::from(IdentityError::Service {
        message: "throttled".into(),
    });
    assert!(err.to_string().contains("throttled"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> cloudctx::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use cloudctx::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["cloudctx", "show", "--json"]);

    if let Commands::Show(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Show command");
    }
}

#[test]
fn config_defaults_are_public() {
    use cloudctx::config::{ResolverConfig, DEFAULT_REGION, METADATA_URL};

    let config = ResolverConfig::default();
    assert_eq!(config.default_region, DEFAULT_REGION);
    assert_eq!(config.metadata_url, METADATA_URL);
}

#[test]
fn failure_classification_is_public() {
    use cloudctx::resolver::{classify_cli_failure, CliFailure};

    let failure = classify_cli_failure("botocore.exceptions.NoRegionError: You must specify a region.");
    assert!(matches!(failure, CliFailure::SdkException(_)));
}
