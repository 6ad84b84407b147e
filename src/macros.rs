/// Builds a [`Value`](crate::Value) tree from a JSON-like literal.
///
/// ```rust
/// use sitedoc::{value, Value};
///
/// let extra = value!({ "a": [1, "x", true] });
/// let list = extra.as_map().and_then(|m| m.get("a")).and_then(Value::as_list);
/// assert_eq!(list.map(Vec::len), Some(3));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Map($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Map(map)
    }};

    // Scalars and parenthesized expressions such as `(-1)`.
    ($s:expr) => {
        $crate::Value::from($s)
    };
}
