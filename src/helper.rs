use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::domain::CustomerRecord;
use crate::errors::AppError;

pub const FORMAT_NAME: &str = "rusty-customers";
pub const FORMAT_VERSION: u32 = 1;
const TXT_HEADER: &str = "# rusty-customers txt v1";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct FileHeader {
    format: String,
    version: u32,
}

impl FileHeader {
    fn current() -> Self {
        Self {
            format: FORMAT_NAME.to_string(),
            version: FORMAT_VERSION,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.format != FORMAT_NAME {
            return Err(AppError::Corrupt(format!(
                "unexpected format '{}'",
                self.format
            )));
        }
        if self.version != FORMAT_VERSION {
            return Err(AppError::Corrupt(format!(
                "unsupported format version {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }
}

fn corrupt_at(line_no: usize, reason: impl std::fmt::Display) -> AppError {
    AppError::Corrupt(format!("line {}: {}", line_no, reason))
}

/// Reads one `\n` terminated line. `Ok(None)` is a clean end of stream; a
/// final line without its terminator is a truncated write.
fn next_line<R: BufRead>(
    reader: &mut R,
    buf: &mut String,
    line_no: &mut usize,
) -> Result<Option<String>, AppError> {
    buf.clear();
    if reader.read_line(buf)? == 0 {
        return Ok(None);
    }
    *line_no += 1;

    match buf.strip_suffix('\n') {
        Some(line) => Ok(Some(line.strip_suffix('\r').unwrap_or(line).to_string())),
        None => Err(corrupt_at(*line_no, "truncated record")),
    }
}

// JSON LINES

pub fn serialize_customers_to_json_lines(customers: &[CustomerRecord]) -> Result<String, AppError> {
    let mut data = serde_json::to_string(&FileHeader::current())?;
    data.push('\n');

    for customer in customers {
        data.push_str(&serde_json::to_string(customer)?);
        data.push('\n');
    }
    Ok(data)
}

pub fn deserialize_customers_from_json_lines<R: BufRead>(
    mut reader: R,
) -> Result<Vec<CustomerRecord>, AppError> {
    let mut customers = Vec::new();
    let mut buf = String::new();
    let mut line_no = 0;

    // A zero-byte file is a freshly created store
    let Some(header) = next_line(&mut reader, &mut buf, &mut line_no)? else {
        return Ok(customers);
    };
    let header: FileHeader =
        serde_json::from_str(&header).map_err(|e| corrupt_at(line_no, e))?;
    header.check()?;

    while let Some(line) = next_line(&mut reader, &mut buf, &mut line_no)? {
        let customer: CustomerRecord =
            serde_json::from_str(&line).map_err(|e| corrupt_at(line_no, e))?;
        customers.push(customer);
    }

    Ok(customers)
}

// TXT BLOCKS

pub fn serialize_customers_to_txt(customers: &[CustomerRecord]) -> String {
    let mut data = String::from(TXT_HEADER);
    data.push('\n');

    for customer in customers {
        let ser_customer = format!(
            "{{\n\
            id={}\n\
            name={}\n\
            phone={}\n\
            email={}\n\
            postal_code={}\n\
            }}\n",
            customer.id(),
            escape(customer.name()),
            escape(customer.phone()),
            escape(customer.email()),
            escape(customer.postal_code())
        );

        data.push_str(&ser_customer);
    }
    data
}

#[derive(Default)]
struct PartialCustomer {
    id: Option<i32>,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    postal_code: Option<String>,
}

impl PartialCustomer {
    fn set(&mut self, key: &str, value: &str, line_no: usize) -> Result<(), AppError> {
        let slot = match key {
            "id" => {
                if self.id.is_some() {
                    return Err(corrupt_at(line_no, "field 'id' repeated"));
                }
                let id = value
                    .parse::<i32>()
                    .map_err(|e| corrupt_at(line_no, format!("bad id: {}", e)))?;
                self.id = Some(id);
                return Ok(());
            }
            "name" => &mut self.name,
            "phone" => &mut self.phone,
            "email" => &mut self.email,
            "postal_code" => &mut self.postal_code,
            other => return Err(corrupt_at(line_no, format!("unknown field '{}'", other))),
        };

        if slot.is_some() {
            return Err(corrupt_at(line_no, format!("field '{}' repeated", key)));
        }
        *slot = Some(unescape(value, line_no)?);
        Ok(())
    }

    fn finish(self, line_no: usize) -> Result<CustomerRecord, AppError> {
        match self {
            PartialCustomer {
                id: Some(id),
                name: Some(name),
                phone: Some(phone),
                email: Some(email),
                postal_code: Some(postal_code),
            } => Ok(CustomerRecord::new(id, name, phone, email, postal_code)),
            _ => Err(corrupt_at(line_no, "record is missing fields")),
        }
    }
}

pub fn deserialize_customers_from_txt_buffer<R: BufRead>(
    mut reader: R,
) -> Result<Vec<CustomerRecord>, AppError> {
    let mut customers = Vec::new();
    let mut buf = String::new();
    let mut line_no = 0;

    let Some(header) = next_line(&mut reader, &mut buf, &mut line_no)? else {
        return Ok(customers);
    };
    if header != TXT_HEADER {
        return Err(corrupt_at(line_no, "missing or unsupported txt header"));
    }

    let mut current: Option<PartialCustomer> = None;

    while let Some(line) = next_line(&mut reader, &mut buf, &mut line_no)? {
        match current.take() {
            // Start of a new customer block
            None if line == "{" => current = Some(PartialCustomer::default()),
            None => return Err(corrupt_at(line_no, "expected '{'")),
            // End of a customer block
            Some(partial) if line == "}" => customers.push(partial.finish(line_no)?),
            Some(mut partial) => {
                let Some((key, value)) = line.split_once('=') else {
                    return Err(corrupt_at(line_no, "expected key=value"));
                };
                partial.set(key, value, line_no)?;
                current = Some(partial);
            }
        }
    }

    if current.is_some() {
        return Err(corrupt_at(line_no, "file ends inside a record"));
    }

    Ok(customers)
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape(value: &str, line_no: usize) -> Result<String, AppError> {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => unescaped.push('\\'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            _ => return Err(corrupt_at(line_no, "bad escape sequence")),
        }
    }
    Ok(unescaped)
}
