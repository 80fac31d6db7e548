use std::fs;
use std::io::{self, BufWriter, Read};

use structopt::StructOpt;
use tracing::{debug, info};

use flbdecode::cliopt::{CliOpt, Format};
use flbdecode::decoder::ByteDecoder;
use flbdecode::logging;
use flbdecode::output::{
    encoder::{Encoder, JSONEncoder, PrometheusEncoder},
    writer::LineWriter,
    Output,
};
use flbdecode::record::{Event, RecordReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();
    logging::init(opt.verbose);

    let buf = match &opt.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    info!(bytes = buf.len(), "decoding chunk");

    let encoder: Box<dyn Encoder> = match opt.encode {
        Format::JSON => Box::new(JSONEncoder::new()),
        Format::Prometheus => Box::new(PrometheusEncoder::new()),
    };
    let mut output = Output::new(
        Box::new(LineWriter::new(BufWriter::new(io::stdout()))),
        encoder,
    );

    let mut reader = RecordReader::new(ByteDecoder::new(&buf));
    let mut written = 0;
    for event in &mut reader {
        let event = event?;
        if output.write(&event)? {
            written += 1;
        } else if let Event::Log(time, _) = &event {
            debug!(%time, "no {:?} representation for log record", opt.encode);
        }
    }
    output.into_inner()?;

    info!(written, skipped = reader.skipped(), "done");
    Ok(())
}
