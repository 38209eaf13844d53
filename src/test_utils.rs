use std::fmt::{Display, Write};

use proptest::prelude::*;

use crate::node::Node;

const KEY_MAX: i64 = 256;

/// Generate arbitrary keys with values from [0..[`KEY_MAX`]).
///
/// A small key domain encourages multiple operations to act on the same key,
/// and keeps the key set dense enough to produce interesting closest pairs.
pub(crate) fn arbitrary_key() -> impl Strategy<Value = i64> {
    0..KEY_MAX
}

#[allow(unused)]
pub(crate) fn print_dot<K, V>(n: &Node<K, V>) -> String
where
    K: Display + Copy,
    V: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{");
    writeln!(buf, r#"bgcolor = "transparent";"#);
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    );
    recurse(n, &mut buf);
    writeln!(buf, "}}");

    buf
}

#[allow(unused)]
fn recurse<K, V, W>(n: &Node<K, V>, buf: &mut W)
where
    W: std::fmt::Write,
    K: Display + Copy,
    V: Display,
{
    let closest = n
        .closest_pair()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "NULL".to_string());

    writeln!(
        buf,
        r#""{}" [label="{} | {} | {{ min={} | max={} | h={} | closest={} }}"];"#,
        n.key(),
        n.key(),
        n.value(),
        n.subtree_min(),
        n.subtree_max(),
        n.height(),
        closest,
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.key(),
                    v.key()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.key()).unwrap();
                writeln!(
                    buf,
                    "\"{}\" -> \"null_{}\" [style=invis];",
                    n.key(),
                    n.key()
                )
                .unwrap();
            }
        };
    }
}
