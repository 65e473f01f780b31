use crate::{ErrorContext, Result, Value};
use serde::de::DeserializeOwned;

/// Decode the positional argument `index` of a script call.
///
/// A missing or `null` argument yields `T::default()`, the same value the script would
/// observe for `undefined` fields. The argument slot is left `null` afterwards.
///
/// *Example*:
/// ```ignore
/// let statement: String = take_arg(&mut args, 0, "statement")?;
/// ```
pub fn take_arg<T>(args: &mut [Value], index: usize, name: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match args.get_mut(index).map(Value::take) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value).with_context(|| {
            format!("While decoding the argument `{name}` (position {index})")
        }),
    }
}
