//! Extra `/variant` items emitted for specific BSPs.
//!
//! Supporting another board means adding a row to [`BSP_EXTRAS`].

use serde_yaml::Value;

use super::types::PatchItem;

/// How an extra item's value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraValue {
  /// The BSP id itself.
  Bsp,
  Literal(&'static str),
}

/// One extra `set` on the variant root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraTemplate {
  pub path: &'static str,
  pub value: ExtraValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BspExtras {
  pub bsp: &'static str,
  pub items: &'static [ExtraTemplate],
}

pub const BSP_EXTRAS: &[BspExtras] = &[BspExtras {
  bsp: "gr740",
  items: &[
    ExtraTemplate {
      path: "/params/sis-target",
      value: ExtraValue::Bsp,
    },
    ExtraTemplate {
      path: "/enabled[0]",
      value: ExtraValue::Literal("sparc/gr740"),
    },
    ExtraTemplate {
      path: "/params/sis-cpus",
      value: ExtraValue::Literal("4"),
    },
  ],
}];

/// Extra templates for `bsp`, empty when the BSP needs none.
pub fn extras_for(bsp: &str) -> &'static [ExtraTemplate] {
  BSP_EXTRAS
    .iter()
    .find(|entry| entry.bsp == bsp)
    .map(|entry| entry.items)
    .unwrap_or(&[])
}

/// Instantiate the extra items for `bsp` against the given target uid.
pub fn extra_items(uid: &str, bsp: &str) -> impl Iterator<Item = PatchItem> {
  let uid = uid.to_string();
  let bsp = bsp.to_string();
  extras_for(&bsp).iter().map(move |template| {
    let value = match template.value {
      ExtraValue::Bsp => Value::from(bsp.as_str()),
      ExtraValue::Literal(text) => Value::from(text),
    };
    PatchItem::set(uid.as_str(), template.path, value)
  })
}
