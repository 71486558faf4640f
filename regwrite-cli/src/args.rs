use std::{fmt::Display, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about = "Build, decode and validate Write Multiple Registers frames", long_about = None)]
pub struct Cli {
    /// Slave address used when building requests
    #[arg(short, long, default_value = "1")]
    pub slave: u8,

    /// Offset between displayed and wire register addresses
    #[arg(short, long, default_value = "-1", allow_negative_numbers = true)]
    pub offset: i32,

    /// Log codec activity (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run a single command instead of the interactive prompt
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Parser, Debug)]
#[command()]
pub struct Interactive {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a request frame from values
    Encode(EncodeArgs),

    /// Decode a request frame
    Decode(FrameArgs),

    /// Print the response a slave sends for a request frame
    Respond(FrameArgs),

    /// Check that a response frame answers a request frame
    Validate(ValidateArgs),

    /// Export the previously printed table
    Export(ExportArgs),

    /// Set configuration
    Set(SetArgs),

    /// Exit the program
    Exit,
}

impl Display for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Commands::Encode(_) => write!(f, "Encode"),
            Commands::Decode(_) => write!(f, "Decode"),
            Commands::Respond(_) => write!(f, "Respond"),
            Commands::Validate(_) => write!(f, "Validate"),
            Commands::Export(_) => write!(f, "Export"),
            Commands::Set(_) => write!(f, "Set"),
            Commands::Exit => write!(f, "Exit"),
        }
    }
}

#[derive(Args, Debug)]
#[command(allow_negative_numbers = true)]
pub struct EncodeArgs {
    /// Holding register address to start writing to (4xxxxx)
    pub address: String,

    /// Values to write
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Datatype of the values
    #[arg(long = "type", value_enum, default_value = "I16")]
    pub datatype: WriteDatatype,

    /// Multi-register order
    #[arg(long = "order", value_enum, default_value = "HL")]
    pub order: WriteOrder,
}

#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Frame as hex, spaces allowed (quote it)
    pub frame: String,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Request frame as hex
    pub request: String,

    /// Response frame as hex
    pub response: String,
}

#[derive(Debug, PartialEq, Clone, Copy, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum WriteDatatype {
    U16,
    I16,
    U32,
    I32,
    F32,
    U64,
    I64,
    F64,
    Hex,
    Bin,
}

#[derive(Debug, PartialEq, Clone, Copy, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum WriteOrder {
    /// First word low
    LH,

    /// First word high
    HL,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// The file to write to
    pub filename: PathBuf,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(subcommand)]
    pub command: SetCommands,
}

#[derive(Subcommand, Debug)]
pub enum SetCommands {
    /// Set the slave address
    Slave { slave: u8 },

    /// Set address offset
    #[command(allow_negative_numbers = true)]
    Offset { offset: i32 },
}
