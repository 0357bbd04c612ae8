// ABOUTME: Example application that binds as a transmitter and sends a long SMS in parts
// ABOUTME: Splits the text with UDH or SAR concatenation and submits one submit_sm per part

use argh::FromArgs;
use smpp_codec::datatypes::{BindMode, BindRequest, SubmitSm, Unbind, status_description};
use smpp_codec::splitter::{Encoding, MessageSplitter, SplitMode};
use smpp_codec::{Connection, Frame};
use std::error::Error;
use tokio::net::TcpStream;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Send a message of any length, split into concatenated parts
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the system id
    #[argh(option)]
    system_id: Option<String>,

    /// the password
    #[argh(option)]
    password: Option<String>,

    /// the hostname of IP address of the SMSC (default: localhost)
    #[argh(option)]
    host: Option<String>,

    /// the port to use when connecting to the SMSC (default: 2775)
    #[argh(option, short = 'p')]
    port: Option<u16>,

    /// use SAR TLVs instead of a UDH to tie the parts together
    #[argh(switch)]
    sar: bool,

    /// the message to send
    #[argh(option, short = 'm')]
    message: String,

    /// the recipient telephone number
    #[argh(option, short = 't')]
    to: String,

    /// the telephone number that the message will be from
    #[argh(option, short = 'f')]
    from: String,
}

async fn expect_response(
    connection: &mut Connection,
    sequence_number: u32,
) -> Result<Frame, Box<dyn Error + Send + Sync>> {
    loop {
        let frame = connection
            .read_frame()
            .await?
            .ok_or("connection closed by SMSC")?;

        if frame.is_response() && frame.sequence_number() == sequence_number {
            let status = frame.command_status();
            if status != 0 {
                let reason = status_description(status);
                return Err(format!("{} failed: {reason} ({status:#010x})", frame.name()).into());
            }
            return Ok(frame);
        }
        warn!(command = frame.name(), "ignoring unexpected frame");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let host = cli_args.host.unwrap_or_else(|| "localhost".to_owned());
    let port = cli_args.port.unwrap_or(2775);

    let socket = TcpStream::connect((host.as_str(), port)).await?;
    let mut connection = Connection::new(socket);
    info!("connected to {host}:{port}");

    let bind = BindRequest::builder(BindMode::Transmitter)
        .sequence_number(1)
        .system_id(cli_args.system_id.unwrap_or_default())
        .password(cli_args.password.unwrap_or_default())
        .build()?;
    connection.write_frame(&bind.into()).await?;
    expect_response(&mut connection, 1).await?;
    info!("bound as transmitter");

    let mode = if cli_args.sar {
        SplitMode::Sar
    } else {
        SplitMode::Udh
    };
    let encoding = Encoding::detect(&cli_args.message);
    let split = MessageSplitter::new(encoding, mode).split(&cli_args.message)?;
    info!(%encoding, parts = split.parts.len(), "message split");

    let template = SubmitSm::builder()
        .source_addr(cli_args.from)
        .destination_addr(cli_args.to)
        .build()?;

    for pdu in split.apply_to(&template, 2)? {
        let sequence_number = pdu.sequence_number;
        connection.write_frame(&pdu.into()).await?;

        if let Frame::SubmitSmResp(resp) = expect_response(&mut connection, sequence_number).await? {
            info!(message_id = %resp.message_id, "part accepted");
        }
    }

    let sequence_number = 2 + split.parts.len() as u32;
    connection
        .write_frame(&Unbind::new(sequence_number).into())
        .await?;
    if let Err(e) = expect_response(&mut connection, sequence_number).await {
        warn!("unbind failed: {e}");
    }

    Ok(())
}
