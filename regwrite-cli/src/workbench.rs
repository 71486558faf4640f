use std::{error::Error, path::Path, time::Instant};

use clap::Parser;
use comfy_table::{presets, CellAlignment, Table};
use regwrite::{Decodable, Encodable, Response, WriteMultipleRegistersRequest, WriteMultipleRegistersResponse};
use rustyline::{completion::Completer, history::MemHistory, Editor, Helper, Highlighter, Hinter, Validator};

use crate::{
    address::Address,
    args::*,
    values::{format_frame, parse_frame, to_registers},
};

const PROMPT: &str = "regwrite> ";

pub fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let mut workbench = Workbench::new(args.slave, args.offset);

    match args.command {
        Some(command) => workbench.execute(&command).map(|_| ()),
        None => workbench.command_loop(),
    }
}

pub struct Workbench {
    slave: u8,
    offset: i32,
    last_table: Option<Table>,
}

impl Workbench {
    pub fn new(slave: u8, offset: i32) -> Self {
        Self {
            slave,
            offset,
            last_table: None,
        }
    }

    fn command_loop(&mut self) -> Result<(), Box<dyn Error>> {
        println!("slave = {}", self.slave);
        println!("offset = {}", self.offset);
        println!();

        let config = rustyline::Config::builder().build();
        let helper = InteractiveHelper {};

        let mut rl = Editor::<InteractiveHelper, MemHistory>::with_history(config, MemHistory::new())?;
        rl.set_helper(Some(helper));

        while let Ok(line) = rl.readline(PROMPT) {
            _ = rl.add_history_entry(line.as_str());

            println!();

            let result = self.handle_command(&line);

            if let Ok(true) = result {
                return Ok(());
            }

            if let Err(err) = result {
                println!("{err}");
            }

            println!();
        }

        Ok(())
    }

    fn handle_command(&mut self, line: &str) -> Result<bool, Box<dyn Error>> {
        let words = shellwords::split(&format!("{PROMPT}{line}"))?;

        let cmd = Interactive::try_parse_from(words)?;

        let start = Instant::now();

        let exit = self.execute(&cmd.command)?;

        if !exit && !matches!(cmd.command, Commands::Set(_)) {
            println!();
            println!("{}: {}us", cmd.command, start.elapsed().as_micros());
        }

        Ok(exit)
    }

    /// Runs one command. Returns `true` when the session should end.
    pub fn execute(&mut self, command: &Commands) -> Result<bool, Box<dyn Error>> {
        match command {
            Commands::Encode(args) => {
                self.encode(args)?;
            }
            Commands::Decode(args) => {
                self.decode(&args.frame)?;
            }
            Commands::Respond(args) => {
                self.respond(&args.frame)?;
            }
            Commands::Validate(args) => self.validate(&args.request, &args.response)?,
            Commands::Export(args) => self.export_csv(&args.filename)?,
            Commands::Set(args) => match args.command {
                SetCommands::Slave { slave } => {
                    self.slave = slave;
                    println!("slave = {slave}");
                }
                SetCommands::Offset { offset } => {
                    self.offset = offset;
                    println!("offset = {offset}");
                }
            },
            Commands::Exit => return Ok(true),
        }
        Ok(false)
    }

    pub fn encode(&mut self, args: &EncodeArgs) -> Result<Vec<u8>, Box<dyn Error>> {
        let address = Address::parse(&args.address, self.offset)?;
        let registers = to_registers(&args.values, args.datatype, args.order)?;
        address.check_block(registers.len())?;

        let request = WriteMultipleRegistersRequest::new(self.slave, address.index, registers)?;
        let frame = request.encode_to_bytes()?;

        println!("{request}");
        println!("{}", format_frame(&frame));
        println!();
        self.print_registers(request.start_address(), request.registers());

        Ok(frame)
    }

    pub fn decode(&mut self, frame: &str) -> Result<WriteMultipleRegistersRequest, Box<dyn Error>> {
        let request = WriteMultipleRegistersRequest::decode_from_bytes(&parse_frame(frame)?)?;

        println!("slave = {}", request.slave_address());
        println!("{request}");
        println!();
        self.print_registers(request.start_address(), request.registers());

        Ok(request)
    }

    pub fn respond(&mut self, frame: &str) -> Result<Vec<u8>, Box<dyn Error>> {
        let request = WriteMultipleRegistersRequest::decode_from_bytes(&parse_frame(frame)?)?;
        let response = WriteMultipleRegistersResponse::for_request(&request).encode_to_bytes()?;

        println!("{}", format_frame(&response));

        Ok(response)
    }

    pub fn validate(&mut self, request: &str, response: &str) -> Result<(), Box<dyn Error>> {
        let request = WriteMultipleRegistersRequest::decode_from_bytes(&parse_frame(request)?)?;
        let response = Response::decode_from_bytes(&parse_frame(response)?)?;

        if response.slave_address() != request.slave_address() {
            tracing::warn!(
                request = request.slave_address(),
                response = response.slave_address(),
                "response comes from another slave"
            );
        }

        request.validate_response(&response.into_write_response()?)?;

        println!("Response acknowledges: {request}");

        Ok(())
    }

    fn print_registers(&mut self, start_address: u16, values: &[u16]) {
        let mut table = Table::new();
        table.load_preset(presets::NOTHING);
        table.set_header(["Address", "U16", "I16", "Hex", "Bin"]);

        table.column_iter_mut().skip(1).for_each(|c| c.set_cell_alignment(CellAlignment::Right));
        table.column_iter_mut().skip(3).for_each(|c| c.set_cell_alignment(CellAlignment::Left));

        for (offset, value) in values.iter().enumerate() {
            let index = start_address.wrapping_add(offset as u16);
            table.add_row([
                Address::display(index, self.offset),
                format!("{}", *value),
                format!("{}", i16::from_be_bytes(value.to_be_bytes())),
                format!("{:04X}", *value),
                format!(
                    "{:04b} {:04b} {:04b} {:04b}",
                    *value >> 12 & 0xF,
                    *value >> 8 & 0xF,
                    *value >> 4 & 0xF,
                    *value & 0xF
                ),
            ]);
        }

        println!("{table}");

        self.last_table = Some(table);
    }

    pub fn export_csv(&self, filename: &Path) -> Result<(), Box<dyn Error>> {
        let table = match &self.last_table {
            Some(table) => table,
            None => {
                println!("Nothing to export");
                return Ok(());
            }
        };

        let mut writer = csv::Writer::from_path(filename)?;

        if let Some(header) = table.header() {
            writer.write_record(header.cell_iter().map(|c| c.content()))?;
        }

        for row in table.row_iter() {
            writer.write_record(row.cell_iter().map(|c| c.content()))?;
        }
        writer.flush()?;

        println!("Exported");

        Ok(())
    }
}

#[derive(Helper, Hinter, Validator, Highlighter)]
struct InteractiveHelper {}
const COMPLETIONS: [&str; 9] = [
    "encode ",
    "decode ",
    "respond ",
    "validate ",
    "set slave ",
    "set offset ",
    "export ",
    "help",
    "exit",
];

impl Completer for InteractiveHelper {
    type Candidate = String;

    fn complete(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let matches = COMPLETIONS
            .iter()
            .filter(|cmd| cmd.starts_with(line) && cmd.len() >= pos)
            .map(|cmd| String::from(&cmd[pos..]))
            .collect();

        Ok((pos, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_args(address: &str, values: &[&str]) -> EncodeArgs {
        EncodeArgs {
            address: address.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
            datatype: WriteDatatype::U16,
            order: WriteOrder::HL,
        }
    }

    #[test]
    fn encode_with_offset() {
        let mut workbench = Workbench::new(0x11, -1);
        let frame = workbench.encode(&encode_args("400002", &["10", "258"])).unwrap();
        assert_eq!(format_frame(&frame), "11 10 00 01 00 02 04 00 0A 01 02");
        assert!(workbench.last_table.is_some());
    }

    #[test]
    fn encode_rejects_oversized_block() {
        let mut workbench = Workbench::new(1, 0);
        let values = vec!["1"; 124];
        assert!(workbench.encode(&encode_args("400000", &values)).is_err());
        assert!(workbench.last_table.is_none());
    }

    #[test]
    fn decode_and_respond() {
        let mut workbench = Workbench::new(1, -1);
        let request = workbench.decode("11 10 00 01 00 02 04 00 0A 01 02").unwrap();
        assert_eq!(request.registers(), &[0x000A, 0x0102]);

        let response = workbench.respond("11 10 00 01 00 02 04 00 0A 01 02").unwrap();
        assert_eq!(format_frame(&response), "11 10 00 01 00 02");

        assert!(workbench.decode("11 10 00 01 00 02 04 00 0A").is_err());
    }

    #[test]
    fn validate_pairs() {
        let mut workbench = Workbench::new(1, -1);
        let request = "11 10 00 01 00 02 04 00 0A 01 02";

        assert!(workbench.validate(request, "11 10 00 01 00 02").is_ok());

        let err = workbench.validate(request, "11 10 00 02 00 02").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected start address in response. Expected 1, received 2.");

        let err = workbench.validate(request, "11 10 00 01 00 03").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected number of points in response. Expected 2, received 3.");

        let err = workbench.validate(request, "11 90 02").unwrap_err();
        assert!(err.to_string().contains("IllegalDataAddress"));
    }

    #[test]
    fn export_last_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registers.csv");

        let mut workbench = Workbench::new(1, -1);
        workbench.export_csv(&path).unwrap();
        assert!(!path.exists());

        workbench.encode(&encode_args("400001", &["10", "65535"])).unwrap();
        workbench.export_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Address,U16,I16,Hex,Bin");
        assert_eq!(lines[1], "400001,10,10,000A,0000 0000 0000 1010");
        assert_eq!(lines[2], "400002,65535,-1,FFFF,1111 1111 1111 1111");
    }

    #[test]
    fn execute_every_command() {
        let dir = tempfile::tempdir().unwrap();
        let request = "11 10 00 01 00 02 04 00 0A 01 02";
        let frame = |frame: &str| FrameArgs { frame: frame.into() };

        let mut workbench = Workbench::new(0x11, -1);
        assert!(!workbench.execute(&Commands::Encode(encode_args("400002", &["10", "258"]))).unwrap());
        assert!(!workbench.execute(&Commands::Decode(frame(request))).unwrap());
        assert!(!workbench.execute(&Commands::Respond(frame(request))).unwrap());
        assert!(!workbench
            .execute(&Commands::Validate(ValidateArgs {
                request: request.into(),
                response: "11 10 00 01 00 02".into(),
            }))
            .unwrap());
        assert!(!workbench
            .execute(&Commands::Export(ExportArgs {
                filename: dir.path().join("out.csv"),
            }))
            .unwrap());
        assert!(dir.path().join("out.csv").exists());
        assert!(workbench.execute(&Commands::Exit).unwrap());

        assert!(workbench.execute(&Commands::Decode(frame("11 10 00"))).is_err());
    }

    #[test]
    fn interactive_set_and_exit() {
        let mut workbench = Workbench::new(1, -1);
        assert!(!workbench.handle_command("set slave 5").unwrap());
        assert_eq!(workbench.slave, 5);
        assert!(!workbench.handle_command("set offset 0").unwrap());
        assert_eq!(workbench.offset, 0);
        assert!(workbench.handle_command("exit").unwrap());
        assert!(workbench.handle_command("bogus").is_err());
    }
}
