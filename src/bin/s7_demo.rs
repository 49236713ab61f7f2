//! Standalone S7 smoke test against a live controller
//!
//! Connects, prints the module order number, then round-trips one value of
//! every supported width through the demo addresses and reports how many
//! operations failed.
//!
//! Usage: `s7_demo <ip> [port] [family]`

use anyhow::{bail, Context, Result};
use voltage_s7::{PlcFamily, S7Client, S7ClientConfig, S7Result};

fn parse_family(name: &str) -> Result<PlcFamily> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "s200" | "200" => PlcFamily::S200,
        "s200smart" | "200smart" | "smart" => PlcFamily::S200Smart,
        "s300" | "300" => PlcFamily::S300,
        "s400" | "400" => PlcFamily::S400,
        "s1200" | "1200" => PlcFamily::S1200,
        "s1500" | "1500" => PlcFamily::S1500,
        other => bail!("unknown PLC family: {other}"),
    })
}

/// Print one write outcome and count it
fn report(label: &str, result: S7Result<()>, failures: &mut u32) {
    match result {
        Ok(()) => println!("{label:<40} ok"),
        Err(error) => {
            *failures += 1;
            println!("{label:<40} FAILED: {error}");
        }
    }
}

/// Print one read outcome and count it
fn report_value<T: std::fmt::Debug>(label: &str, result: S7Result<T>, failures: &mut u32) {
    match result {
        Ok(value) => println!("{label:<40} {value:?}"),
        Err(error) => {
            *failures += 1;
            println!("{label:<40} FAILED: {error}");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let ip = args.next().context("usage: s7_demo <ip> [port] [family]")?;
    let port = match args.next() {
        Some(raw) => raw.parse().context("port must be a number")?,
        None => voltage_s7::DEFAULT_PORT,
    };
    let family = match args.next() {
        Some(raw) => parse_family(&raw)?,
        None => PlcFamily::S1200,
    };

    println!("{}", voltage_s7::info());
    println!("target: {ip}:{port} ({family})");
    println!("========================================");

    let config = S7ClientConfig::new(ip)
        .with_port(port)
        .with_family(family)
        .with_connect_timeout(std::time::Duration::from_secs(5));
    let mut client = S7Client::new(config);
    client.connect()?;
    println!("connected, negotiated PDU length {}", client.pdu_length());

    let mut failures = 0u32;
    report_value("plc type", client.read_plc_type(), &mut failures);

    report("write MX100 bool true", client.write_bool("MX100", true), &mut failures);
    report_value("read  MX100 bool", client.read_bool("MX100"), &mut failures);

    report("write MB100 byte 23", client.write_byte("MB100", 23), &mut failures);
    report_value("read  MB100 byte", client.read_byte("MB100"), &mut failures);

    report(
        "write MB100 bytes [0x11, 0x22]",
        client.write_bytes("MB100", &[0x11, 0x22]),
        &mut failures,
    );
    report_value("read  MB100 bytes", client.read_bytes("MB100", 2), &mut failures);

    report("write MW100 short -223", client.write_short("MW100", -223), &mut failures);
    report_value("read  MW100 short", client.read_short("MW100"), &mut failures);

    report("write MW100 ushort 22255", client.write_ushort("MW100", 22255), &mut failures);
    report_value("read  MW100 ushort", client.read_ushort("MW100"), &mut failures);

    report("write DB1.70 int32 -12345", client.write_int32("DB1.70", -12345), &mut failures);
    report_value("read  DB1.70 int32", client.read_int32("DB1.70"), &mut failures);

    report("write DB1.70 uint32 22345", client.write_uint32("DB1.70", 22345), &mut failures);
    report_value("read  DB1.70 uint32", client.read_uint32("DB1.70"), &mut failures);

    report(
        "write DB1.DBD70 int64 -333334554",
        client.write_int64("DB1.DBD70", -333334554),
        &mut failures,
    );
    report_value("read  DB1.DBD70 int64", client.read_int64("DB1.DBD70"), &mut failures);

    report(
        "write DB1.DBD70 uint64 4333334554",
        client.write_uint64("DB1.DBD70", 4333334554),
        &mut failures,
    );
    report_value("read  DB1.DBD70 uint64", client.read_uint64("DB1.DBD70"), &mut failures);

    report(
        "write DB1.DBD70 float 32.454",
        client.write_float("DB1.DBD70", 32.454),
        &mut failures,
    );
    report_value("read  DB1.DBD70 float", client.read_float("DB1.DBD70"), &mut failures);

    report(
        "write DB1.DBD70 double -12345.6789",
        client.write_double("DB1.DBD70", -12345.6789),
        &mut failures,
    );
    report_value("read  DB1.DBD70 double", client.read_double("DB1.DBD70"), &mut failures);

    report(
        "write DB1.DBD70 string",
        client.write_string("DB1.DBD70", "VOLTAGE-S7-DEMO"),
        &mut failures,
    );
    report_value(
        "read  DB1.DBD70 string",
        client.read_string("DB1.DBD70", 15),
        &mut failures,
    );

    println!("========================================");
    println!("failed operations: {failures}");
    println!("session stats: {}", serde_json::to_string_pretty(client.stats())?);

    client.disconnect();
    Ok(())
}
