use regex::Regex;

use crate::CliError;

const RANGE_ITEM: &str = r"^(\d+)(?:-(\d+))?$";

/// Expands a comma-separated list of `N` and `N-M` items into the values it
/// names, in the order given. Bounds are inclusive.
pub fn parse_range_list<T>(input: &str) -> Result<Vec<T>, CliError>
where
    T: TryFrom<u64>,
{
    let item_re =
        Regex::new(RANGE_ITEM).map_err(|err| CliError::InvalidRange(err.to_string()))?;

    let mut values = Vec::new();
    for item in input.split(',') {
        let item = item.trim();
        let captures = item_re.captures(item).ok_or_else(|| {
            CliError::InvalidRange(format!("'{item}' is not a number or range in '{input}'"))
        })?;

        let start = parse_bound(&captures[1], input)?;
        let end = match captures.get(2) {
            Some(end) => parse_bound(end.as_str(), input)?,
            None => start,
        };
        if start > end {
            return Err(CliError::InvalidRange(format!(
                "range {start}-{end} in '{input}' is reversed"
            )));
        }
        convert::<T>(end, input)?;

        for value in start..=end {
            values.push(convert(value, input)?);
        }
    }
    Ok(values)
}

fn parse_bound(text: &str, input: &str) -> Result<u64, CliError> {
    text.parse()
        .map_err(|_| CliError::InvalidRange(format!("'{text}' in '{input}' is too large")))
}

fn convert<T: TryFrom<u64>>(value: u64, input: &str) -> Result<T, CliError> {
    T::try_from(value)
        .map_err(|_| CliError::InvalidRange(format!("{value} in '{input}' is out of range")))
}
