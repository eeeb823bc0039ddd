use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid assignment '{0}'. Expected 'ELEMENT=VALUE' (e.g., 'C=0.01').")]
    InvalidAssignmentFormat(String),

    #[error("Invalid range '{0}'. Expected 'START:STOP:COUNT' (e.g., '700:1200:50').")]
    InvalidRangeFormat(String),

    #[error("Invalid number '{value}' in '{input}'.")]
    InvalidNumber { value: String, input: String },

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// An `ELEMENT=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub element: String,
    pub value: f64,
}

/// A `START:STOP:COUNT` axis from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

pub fn parse_assignment(input: &str) -> Result<Assignment, ParseError> {
    let (element, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidAssignmentFormat(input.to_string()))?;

    let element = element.trim();
    if element.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "element",
            input: input.to_string(),
        });
    }

    Ok(Assignment {
        element: element.to_string(),
        value: parse_number(value.trim(), input)?,
    })
}

pub fn parse_range(input: &str) -> Result<RangeSpec, ParseError> {
    let parts: Vec<&str> = input.split(':').map(str::trim).collect();
    let [start, stop, count] = parts.as_slice() else {
        return Err(ParseError::InvalidRangeFormat(input.to_string()));
    };

    let count = count.parse().map_err(|_| ParseError::InvalidNumber {
        value: count.to_string(),
        input: input.to_string(),
    })?;

    Ok(RangeSpec {
        start: parse_number(start, input)?,
        stop: parse_number(stop, input)?,
        count,
    })
}

fn parse_number(value: &str, input: &str) -> Result<f64, ParseError> {
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            input: input.to_string(),
        });
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            value: value.to_string(),
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_assignment_valid() {
        assert_eq!(
            parse_assignment("Fe=0.98"),
            Ok(Assignment {
                element: "Fe".to_string(),
                value: 0.98
            })
        );
        assert_eq!(parse_assignment(" C = 1e-5 ").unwrap().value, 1e-5);
    }

    #[test]
    fn parse_assignment_invalid_format() {
        assert_eq!(
            parse_assignment("Fe:0.98"),
            Err(ParseError::InvalidAssignmentFormat("Fe:0.98".to_string()))
        );
    }

    #[test]
    fn parse_assignment_empty_components() {
        assert!(matches!(
            parse_assignment("=0.5"),
            Err(ParseError::EmptyComponent {
                component: "element",
                ..
            })
        ));
        assert!(matches!(
            parse_assignment("Fe="),
            Err(ParseError::EmptyComponent {
                component: "value",
                ..
            })
        ));
    }

    #[test]
    fn parse_assignment_rejects_non_numbers() {
        assert!(matches!(
            parse_assignment("Fe=lots"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_assignment("Fe=NaN"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn parse_range_valid() {
        assert_eq!(
            parse_range("700:1200:50"),
            Ok(RangeSpec {
                start: 700.0,
                stop: 1200.0,
                count: 50
            })
        );
        assert_eq!(parse_range("1e-5:1e-1:51").unwrap().start, 1e-5);
    }

    #[test]
    fn parse_range_invalid_format() {
        assert_eq!(
            parse_range("700:1200"),
            Err(ParseError::InvalidRangeFormat("700:1200".to_string()))
        );
        assert!(matches!(
            parse_range("700:1200:50:1"),
            Err(ParseError::InvalidRangeFormat(_))
        ));
    }

    #[test]
    fn parse_range_rejects_fractional_count() {
        assert_eq!(
            parse_range("0:1:2.5"),
            Err(ParseError::InvalidNumber {
                value: "2.5".to_string(),
                input: "0:1:2.5".to_string()
            })
        );
    }
}
