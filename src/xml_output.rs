use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use crate::address::AddressRecord;
use crate::country::CountryCodeResolver;

pub const ROOT_ELEMENT: &str = "Config";
pub const ADDRESS_ELEMENT: &str = "BFFO_Address";
pub const SCHEMA_FILE: &str = "bfpo_config.xsd";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed document: {0}")]
    Parse(String),
}

/// Header comment placed at the top of the document
pub fn header_comment(generated: NaiveDate) -> String {
    format!(
        "\nBFPO Address Configuration\n\
         Generated from GOV.UK BFPO locations\n\
         Last Updated: {}\n\
         Schema: {SCHEMA_FILE}\n\
         Country Codes: ISO 3166-1 alpha-2\n",
        generated.format("%Y-%m-%d")
    )
}

/// Write the records as a tab-indented document
///
/// Children appear in schema order: BfpoNum, BoxNum, Loc, PstCd, Ctry, CtryCd,
/// Type. A country code that fails `is_valid_code` is left out.
pub fn write_document<W: Write>(
    records: &[AddressRecord],
    resolver: &CountryCodeResolver,
    generated: NaiveDate,
    out: W,
) -> Result<(), OutputError> {
    let mut writer = Writer::new_with_indent(out, b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
    writer.write_event(Event::Comment(BytesText::new(&header_comment(generated))))?;

    for record in records {
        writer.write_event(Event::Start(BytesStart::new(ADDRESS_ELEMENT)))?;

        write_field(&mut writer, "BfpoNum", Some(record.bfpo_num()))?;
        write_field(&mut writer, "BoxNum", record.box_num())?;
        write_field(&mut writer, "Loc", Some(record.location()))?;
        write_field(&mut writer, "PstCd", record.postcode())?;
        write_field(&mut writer, "Ctry", record.country())?;

        let code = record.country_code().filter(|code| {
            let valid = resolver.is_valid_code(code);
            if !valid {
                warn!(
                    "Dropping invalid country code '{}' for {}",
                    code,
                    record.bfpo_num()
                );
            }
            valid
        });
        write_field(&mut writer, "CtryCd", code)?;

        write_field(&mut writer, "Type", Some(record.bfpo_type().as_str()))?;

        writer.write_event(Event::End(BytesEnd::new(ADDRESS_ELEMENT)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    writer.into_inner().write_all(b"\n")?;
    Ok(())
}

fn write_field<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: Option<&str>,
) -> Result<(), OutputError> {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        writer
            .create_element(name)
            .write_text_content(BytesText::new(value))?;
    }
    Ok(())
}

pub fn to_xml_string(
    records: &[AddressRecord],
    resolver: &CountryCodeResolver,
    generated: NaiveDate,
) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    write_document(records, resolver, generated, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| OutputError::Parse(e.to_string()))
}

pub fn write_file(
    path: &Path,
    records: &[AddressRecord],
    resolver: &CountryCodeResolver,
    generated: NaiveDate,
) -> Result<(), OutputError> {
    let file = std::fs::File::create(path)?;
    let mut out = std::io::BufWriter::new(file);
    write_document(records, resolver, generated, &mut out)?;
    out.flush()?;
    info!("Wrote {} BFPO addresses to {}", records.len(), path.display());
    Ok(())
}

/// One `BFFO_Address` element read back from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAddress {
    pub bfpo_num: String,
    pub box_num: Option<String>,
    pub location: String,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub bfpo_type: String,
}

impl ParsedAddress {
    fn set(&mut self, field: &str, value: String) -> Result<(), OutputError> {
        match field {
            "BfpoNum" => self.bfpo_num = value,
            "BoxNum" => self.box_num = Some(value),
            "Loc" => self.location = value,
            "PstCd" => self.postcode = Some(value),
            "Ctry" => self.country = Some(value),
            "CtryCd" => self.country_code = Some(value),
            "Type" => self.bfpo_type = value,
            other => return Err(OutputError::Parse(format!("unexpected element <{other}>"))),
        }
        Ok(())
    }
}

/// Read a document produced by [`write_document`]
pub fn parse_document(xml: &str) -> Result<Vec<ParsedAddress>, OutputError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut addresses = Vec::new();
    let mut current: Option<ParsedAddress> = None;
    let mut field: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == ADDRESS_ELEMENT {
                    current = Some(ParsedAddress::default());
                } else if current.is_some() {
                    field = Some(name);
                }
            }
            Event::Text(t) => {
                if let (Some(address), Some(name)) = (current.as_mut(), field.as_deref()) {
                    address.set(name, t.unescape()?.into_owned())?;
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == ADDRESS_ELEMENT.as_bytes() {
                    let address = current.take().ok_or_else(|| {
                        OutputError::Parse("unbalanced address element".to_string())
                    })?;
                    if address.bfpo_num.is_empty() || address.bfpo_type.is_empty() {
                        return Err(OutputError::Parse(
                            "address without BfpoNum or Type".to_string(),
                        ));
                    }
                    addresses.push(address);
                } else {
                    field = None;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(addresses)
}
