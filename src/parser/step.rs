use std::collections::HashMap;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    String(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Enum(String),
    Reference(u64),
    List(Vec<StepValue>),
    Null,
    Derived,
}

impl StepValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StepValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_reference(&self) -> Option<u64> {
        match self {
            StepValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// References held by a list value, or the single reference itself.
    #[must_use]
    pub fn references(&self) -> Vec<u64> {
        match self {
            StepValue::Reference(id) => vec![*id],
            StepValue::List(items) => items.iter().filter_map(StepValue::as_reference).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepEntity {
    pub id: u64,
    pub entity_type: String,
    pub values: Vec<StepValue>,
}

/// The DATA section of a STEP Part 21 exchange file.
///
/// Entities are kept in file order, with an index by upper-case entity type.
#[derive(Debug, Default)]
pub struct StepFile {
    pub schema: String,
    entities: HashMap<u64, StepEntity>,
    order: Vec<u64>,
    by_type: HashMap<String, Vec<u64>>,
}

impl StepFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();
        if !content.starts_with("ISO-10303-21") {
            return Err(ParseError::InvalidStep {
                message: "missing ISO-10303-21 header".to_string(),
            });
        }

        let mut file = StepFile::default();
        let mut in_data = false;
        let mut saw_data = false;

        for statement in split_statements(content) {
            let statement = statement.trim();

            if statement.starts_with("FILE_SCHEMA") {
                file.schema = parse_schema_name(statement).unwrap_or_default();
                continue;
            }
            if statement == "DATA" || statement.starts_with("DATA(") {
                in_data = true;
                saw_data = true;
                continue;
            }
            if statement == "ENDSEC" {
                in_data = false;
                continue;
            }

            if in_data && statement.starts_with('#') {
                let entity = parse_entity(statement)?;
                file.insert(entity);
            }
        }

        if !saw_data {
            return Err(ParseError::InvalidStep {
                message: "missing DATA section".to_string(),
            });
        }

        Ok(file)
    }

    fn insert(&mut self, entity: StepEntity) {
        let id = entity.id;
        let entity_type = entity.entity_type.clone();
        if self.entities.insert(id, entity).is_none() {
            self.order.push(id);
            self.by_type.entry(entity_type).or_default().push(id);
        }
    }

    #[must_use]
    pub fn get_entity(&self, id: u64) -> Option<&StepEntity> {
        self.entities.get(&id)
    }

    /// All entities of exactly `entity_type` (upper-case STEP spelling), in file order.
    #[must_use]
    pub fn get_entities_by_type(&self, entity_type: &str) -> Vec<&StepEntity> {
        self.by_type
            .get(entity_type)
            .map(|ids| ids.iter().filter_map(|id| self.entities.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn entities(&self) -> impl Iterator<Item = &StepEntity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Splits the exchange structure on `;`, ignoring separators inside strings
/// and dropping `/* ... */` comments.
fn split_statements(content: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_string = !in_string;
                current.push(ch);
            }
            '/' if !in_string && chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            ';' if !in_string => {
                statements.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        statements.push(current);
    }
    statements
}

fn parse_schema_name(statement: &str) -> Option<String> {
    let start = statement.find('\'')?;
    let rest = &statement[start + 1..];
    let end = rest.find('\'')?;
    Some(rest[..end].trim().to_string())
}

fn parse_entity(statement: &str) -> Result<StepEntity, ParseError> {
    // Format: #123=IFCWALL('guid',#ref,'name',...)
    let malformed = || ParseError::InvalidStep {
        message: format!("malformed entity instance: {}", truncate(statement, 80)),
    };

    let eq_pos = statement.find('=').ok_or_else(malformed)?;
    let id: u64 = statement[1..eq_pos].trim().parse().map_err(|_| malformed())?;

    let rest = statement[eq_pos + 1..].trim();
    let paren_pos = rest.find('(').ok_or_else(malformed)?;
    if !rest.ends_with(')') {
        return Err(malformed());
    }
    let entity_type = rest[..paren_pos].trim().to_ascii_uppercase();
    if entity_type.is_empty() {
        return Err(malformed());
    }

    let values = parse_values(&rest[paren_pos + 1..rest.len() - 1]);

    Ok(StepEntity {
        id,
        entity_type,
        values,
    })
}

fn parse_values(s: &str) -> Vec<StepValue> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut paren_depth = 0usize;

    for ch in s.chars() {
        match ch {
            '\'' => {
                in_string = !in_string;
                current.push(ch);
            }
            '(' if !in_string => {
                paren_depth += 1;
                current.push(ch);
            }
            ')' if !in_string => {
                paren_depth = paren_depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if !in_string && paren_depth == 0 => {
                values.push(parse_single_value(current.trim()));
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        values.push(parse_single_value(current.trim()));
    }

    values
}

fn parse_single_value(s: &str) -> StepValue {
    match s {
        "$" => return StepValue::Null,
        "*" => return StepValue::Derived,
        _ => {}
    }

    if let Some(id) = s.strip_prefix('#').and_then(|rest| rest.parse::<u64>().ok()) {
        return StepValue::Reference(id);
    }
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        return StepValue::String(decode_step_string(&s[1..s.len() - 1]));
    }
    if s.len() >= 2 && s.starts_with('.') && s.ends_with('.') {
        return match &s[1..s.len() - 1] {
            "T" => StepValue::Boolean(true),
            "F" => StepValue::Boolean(false),
            other => StepValue::Enum(other.to_string()),
        };
    }
    if s.starts_with('(') && s.ends_with(')') {
        return StepValue::List(parse_values(&s[1..s.len() - 1]));
    }
    if let Ok(i) = s.parse::<i64>() {
        return StepValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return StepValue::Real(f);
    }
    // Typed value like IFCBOOLEAN(.T.) collapses to its payload
    if let Some(paren_pos) = s.find('(') {
        if s.ends_with(')') {
            return parse_single_value(s[paren_pos + 1..s.len() - 1].trim());
        }
    }

    StepValue::String(s.to_string())
}

/// Decodes the control directives of STEP strings:
/// `''`, `\\`, `\S\c`, `\X\hh`, `\X2\hhhh...\X0\` and `\X4\hhhhhhhh...\X0\`.
fn decode_step_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(ch) = rest.chars().next() {
        if ch == '\'' {
            out.push('\'');
            rest = rest.strip_prefix("''").unwrap_or(&rest[1..]);
        } else if let Some(tail) = rest.strip_prefix("\\\\") {
            out.push('\\');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("\\S\\") {
            let mut tail_chars = tail.chars();
            if let Some(c) = tail_chars.next() {
                if let Some(shifted) = char::from_u32(u32::from(c) + 0x80) {
                    out.push(shifted);
                }
            }
            rest = tail_chars.as_str();
        } else if let Some(tail) = rest.strip_prefix("\\X\\") {
            match tail.get(..2).and_then(|hex| u8::from_str_radix(hex, 16).ok()) {
                Some(code) => {
                    out.push(char::from(code));
                    rest = &tail[2..];
                }
                None => {
                    out.push_str("\\X\\");
                    rest = tail;
                }
            }
        } else if let Some((width, tail)) = rest
            .strip_prefix("\\X2\\")
            .map(|t| (4, t))
            .or_else(|| rest.strip_prefix("\\X4\\").map(|t| (8, t)))
        {
            let end = tail.find("\\X0\\").unwrap_or(tail.len());
            let hex = &tail[..end];
            for chunk in hex.as_bytes().chunks(width) {
                let decoded = std::str::from_utf8(chunk)
                    .ok()
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .and_then(char::from_u32);
                if let Some(c) = decoded {
                    out.push(c);
                }
            }
            rest = tail.get(end + 4..).unwrap_or("");
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
/* a comment; with a separator */
#1=IFCWALL('2O2Fr$t4X7Zf8NOew3FLOH',$,'Wall; north',$,$,#2,$,$,.STANDARD.);
#2=IFCLOCALPLACEMENT($,
  $);
#3=IFCPROPERTYSINGLEVALUE('IsExternal',$,IFCBOOLEAN(.T.),$);
#4=IFCWALL('1kTvXnbbzCWw8lcMd1dR4o',$,$,$,$,$,$,$,$);
ENDSEC;
END-ISO-10303-21;
";

    #[test]
    fn parses_multiline_entities_and_schema() {
        let file = StepFile::parse(SAMPLE).unwrap();

        assert_eq!(file.schema, "IFC4");
        assert_eq!(file.len(), 4);
        assert_eq!(file.get_entity(2).unwrap().values, vec![StepValue::Null, StepValue::Null]);
    }

    #[test]
    fn keeps_separators_inside_strings() {
        let file = StepFile::parse(SAMPLE).unwrap();
        let wall = file.get_entity(1).unwrap();

        assert_eq!(wall.values[2], StepValue::String("Wall; north".to_string()));
        assert_eq!(wall.values[5], StepValue::Reference(2));
        assert_eq!(wall.values[8], StepValue::Enum("STANDARD".to_string()));
    }

    #[test]
    fn unwraps_typed_values() {
        let file = StepFile::parse(SAMPLE).unwrap();
        let prop = file.get_entity(3).unwrap();

        assert_eq!(prop.values[2], StepValue::Boolean(true));
    }

    #[test]
    fn entities_by_type_follow_file_order() {
        let file = StepFile::parse(SAMPLE).unwrap();
        let ids: Vec<u64> = file.get_entities_by_type("IFCWALL").iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn parses_reals_and_nested_lists() {
        assert_eq!(parse_single_value("3."), StepValue::Real(3.0));
        assert_eq!(parse_single_value("-1.5E-3"), StepValue::Real(-0.0015));
        assert_eq!(
            parse_values("(#1,#2),('a)b',$)"),
            vec![
                StepValue::List(vec![StepValue::Reference(1), StepValue::Reference(2)]),
                StepValue::List(vec![StepValue::String("a)b".to_string()), StepValue::Null]),
            ]
        );
    }

    #[test]
    fn decodes_string_escapes() {
        assert_eq!(decode_step_string("it''s"), "it's");
        assert_eq!(decode_step_string("a\\\\b"), "a\\b");
        assert_eq!(decode_step_string("\\X2\\00C400D6\\X0\\l"), "ÄÖl");
        assert_eq!(decode_step_string("\\X\\E9t\\X\\E9"), "été");
        assert_eq!(decode_step_string("\\S\\D"), "Ä");
    }

    #[test]
    fn rejects_files_without_header() {
        let err = StepFile::parse("DATA;\nENDSEC;").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStep { .. }));
    }

    #[test]
    fn rejects_files_without_data_section() {
        let err = StepFile::parse("ISO-10303-21;\nHEADER;\nENDSEC;\nEND-ISO-10303-21;").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStep { .. }));
    }

    #[test]
    fn rejects_malformed_entities() {
        let err = StepFile::parse("ISO-10303-21;\nDATA;\n#x=IFCWALL();\nENDSEC;").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStep { .. }));
    }
}
