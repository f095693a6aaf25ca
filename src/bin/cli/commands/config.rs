//! Configuration management commands.
//!
//! Initialization, validation, and printing of default configuration files.

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::cli::args::{InitConfigArgs, ValidateConfigArgs};
use success_norm::core::config::SuccessNormConfig;

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    println!("# Default success-norm configuration");
    println!("# Save this to a file and customize as needed");
    println!("# Usage: success-norm normalise --config your-config.yml");
    println!();

    let config = SuccessNormConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub fn init_config(args: &InitConfigArgs) -> anyhow::Result<()> {
    // Check if file exists and force not specified
    if args.output.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Configuration file already exists: {}. Use --force to overwrite or choose a different name with --output",
            args.output.display()
        ));
    }

    SuccessNormConfig::default().to_yaml_file(&args.output)?;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "📝 Next steps:".bright_blue().bold());
    println!("   1. Set normalisation.average_rating to the mean success rate of your dataset");
    println!(
        "   2. Run with: {}",
        format!("success-norm normalise --config {}", args.output.display()).cyan()
    );

    Ok(())
}

/// Validate a success-norm configuration file
pub fn validate_config(args: &ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = SuccessNormConfig::from_yaml_file(&args.config)
        .and_then(|config| config.validate().map(|()| config));

    let config = match config {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • average_rating must be between 0.0 and 1.0");
            println!("   • precision must be between 0 and 10");
            println!();
            println!(
                "{}",
                "💡 Tip: Use 'success-norm print-default-config' to see valid format".dimmed()
            );
            return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
        }
    };

    display_config_summary(&config);
    Ok(())
}

/// Print the effective settings as a table.
fn display_config_summary(config: &SuccessNormConfig) {
    /// Row for configuration display table.
    #[derive(Tabled)]
    struct ConfigRow {
        setting: String,
        value: String,
    }

    let rows = vec![
        ConfigRow {
            setting: "Rate table".to_string(),
            value: config.input.rates_path.display().to_string(),
        },
        ConfigRow {
            setting: "Image table".to_string(),
            value: config.input.images_path.display().to_string(),
        },
        ConfigRow {
            setting: "Average rating".to_string(),
            value: config.normalisation.average_rating.to_string(),
        },
        ConfigRow {
            setting: "Precision".to_string(),
            value: config.normalisation.precision.to_string(),
        },
        ConfigRow {
            setting: "On degenerate".to_string(),
            value: format!("{:?}", config.normalisation.on_degenerate),
        },
        ConfigRow {
            setting: "On malformed".to_string(),
            value: format!("{:?}", config.normalisation.on_malformed),
        },
        ConfigRow {
            setting: "Output format".to_string(),
            value: format!("{:?}", config.output.format),
        },
    ];

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
}
