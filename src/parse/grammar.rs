use winnow::ascii::{dec_uint, space0};
use winnow::combinator::{cut_err, delimited, opt, preceded, terminated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ItemName;

// -- Count ranges -----------------------------------------------------------

fn amount(input: &mut &str) -> ModalResult<i32> {
    delimited(space0, dec_uint::<_, u32, _>, space0)
        .try_map(i32::try_from)
        .context(StrContext::Expected(StrContextValue::Description(
            "non-negative amount",
        )))
        .parse_next(input)
}

fn dashes<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., '-').parse_next(input)
}

/// `N` or `N-M`. Returns `(min, max)` exactly as written.
///
/// Empty pieces between dashes are skipped, so `-5` reads as `5` and `1--3`
/// as `1-3`.
pub(super) fn count_range(input: &mut &str) -> ModalResult<(i32, i32)> {
    dashes.parse_next(input)?;
    let min = amount.parse_next(input)?;
    let max = opt(preceded(take_while(1.., '-'), amount)).parse_next(input)?;
    dashes.parse_next(input)?;
    Ok((min, max.unwrap_or(min)))
}

// -- Item names -------------------------------------------------------------

fn name_part<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
    })
    .parse_next(input)
}

/// `[namespace:]path[@meta]`
pub(super) fn item_name<'i>(input: &mut &'i str) -> ModalResult<ItemName<'i>> {
    let first = name_part.parse_next(input)?;
    let second = opt(preceded(':', cut_err(name_part))).parse_next(input)?;
    let meta = opt(preceded(
        '@',
        cut_err(dec_uint::<_, u32, _>).context(StrContext::Expected(
            StrContextValue::Description("metadata value"),
        )),
    ))
    .parse_next(input)?;

    let (namespace, path) = match second {
        Some(path) => (Some(first), path),
        None => (None, first),
    };
    Ok(ItemName {
        namespace,
        path,
        meta,
    })
}

/// `item_name` surrounded by optional blanks.
pub(super) fn padded_item_name<'i>(input: &mut &'i str) -> ModalResult<ItemName<'i>> {
    preceded(space0, terminated(item_name, space0)).parse_next(input)
}
