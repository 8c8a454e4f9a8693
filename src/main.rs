use clap::{Arg, ArgAction, Command as ClapCommand};
use log::{error, Level};
use std::process;

use tagkit::commands::{CommandFactory, TagkitCommandFactory};
use tagkit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("TagKit")
        .version("0.1.0")
        .about("Inspect and repack the IFD structure of TIFF and Exif files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            ClapCommand::new("print")
                .about("Dump every IFD of a TIFF file, including maker notes")
                .arg(
                    Arg::new("input")
                        .help("Input TIFF file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("max-values")
                        .short('m')
                        .long("max-values")
                        .help("Maximum values to print per field, 0 for no limit")
                        .value_name("N")
                        .default_value("20"),
                ),
        )
        .subcommand(
            ClapCommand::new("repack")
                .about("Decode a TIFF file and re-serialize it into a canonical layout")
                .arg(
                    Arg::new("input")
                        .help("Input TIFF file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .help("Output TIFF file")
                        .required(true)
                        .index(2),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { Level::Debug } else { Level::Warn };
    if let Err(e) = Logger::init_global_logger(level) {
        eprintln!("Error setting up logger: {}", e);
        process::exit(1);
    }

    let log_file = "tagkit.log";
    let logger = match Logger::with_file(log_file, level) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = TagkitCommandFactory::new();
    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
