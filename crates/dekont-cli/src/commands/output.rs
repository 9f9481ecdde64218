//! Rendering of transaction records.

use std::fmt::Write as _;

use dekont_core::TransactionRecord;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

const CSV_HEADER: [&str; 13] = [
    "bank",
    "transaction_date",
    "amount",
    "sender_name",
    "sender_iban",
    "receiver_name",
    "receiver_iban",
    "is_fast",
    "is_havale",
    "is_eft",
    "is_maas",
    "is_incoming",
    "is_outgoing",
];

pub fn format_record(
    record: &TransactionRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &TransactionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    let kind = &record.transfer_kind;
    wtr.write_record([
        record.bank.as_str(),
        &record.transaction_date,
        &record.amount.map(|a| a.to_string()).unwrap_or_default(),
        &record.sender.name,
        &record.sender.iban,
        &record.receiver.name,
        &record.receiver.iban,
        &kind.is_fast.to_string(),
        &kind.is_havale.to_string(),
        &kind.is_eft.to_string(),
        &kind.is_maas.to_string(),
        &kind.is_incoming.to_string(),
        &kind.is_outgoing.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &TransactionRecord) -> String {
    let mut output = String::new();
    let dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    let _ = writeln!(output, "Bank: {}", record.bank);
    let _ = writeln!(output, "Date: {}", dash(&record.transaction_date));
    let _ = writeln!(
        output,
        "Amount: {}",
        record.amount.map(|a| format!("{} TL", a)).unwrap_or_else(|| "-".to_string())
    );

    let kind = &record.transfer_kind;
    let flags: Vec<&str> = [
        (kind.is_fast, "FAST"),
        (kind.is_havale, "havale"),
        (kind.is_eft, "EFT"),
        (kind.is_maas, "salary"),
        (kind.is_incoming, "incoming"),
        (kind.is_outgoing, "outgoing"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();
    let _ = writeln!(output, "Kind: {}", if flags.is_empty() { "-".to_string() } else { flags.join(", ") });
    output.push('\n');

    for (title, party) in [("Sender", &record.sender), ("Receiver", &record.receiver)] {
        let _ = writeln!(output, "{}:", title);
        let _ = writeln!(output, "  {}", dash(&party.name));
        let _ = writeln!(output, "  IBAN: {}", dash(&party.iban));
    }

    if !record.diagnostics.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &record.diagnostics.warnings {
            let _ = writeln!(output, "  - {}", warning);
        }
    }

    output
}
