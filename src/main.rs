use clap::Parser;
use metafeta::application::InspectService;
use metafeta::cli::{format_attribute_list, format_store, Cli, Commands};
use metafeta::error::MetafetaError;
use metafeta::infrastructure::LoaderConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const NOT_TAGGED_EXIT_CODE: i32 = 5;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set up logging: {}", e);
    }
}

fn run(cli: Cli) -> Result<i32, MetafetaError> {
    let config = LoaderConfig::load_from_dir(&cli.dir)?;
    let service = InspectService::new(&config);

    match cli.command {
        Commands::Show { type_name, extends } => {
            let store = service.show(&type_name, &extends)?;
            print!("{}", format_store(&type_name, &extends, &store));
            Ok(0)
        }
        Commands::Attrs {
            type_name,
            tag,
            extends,
        } => {
            let attributes = service.attributes(&type_name, &tag, &extends)?;
            let output = format_attribute_list(&attributes);
            if attributes.is_empty() {
                println!("{}", output);
            } else {
                print!("{}", output);
            }
            Ok(0)
        }
        Commands::Check {
            type_name,
            attribute,
            tag,
            extends,
        } => {
            if service.check(&type_name, &attribute, &tag, &extends)? {
                println!("yes");
                Ok(0)
            } else {
                println!("no");
                Ok(NOT_TAGGED_EXIT_CODE)
            }
        }
        Commands::Path { type_name } => {
            println!("{}", service.path_for(&type_name)?.display());
            Ok(0)
        }
    }
}
