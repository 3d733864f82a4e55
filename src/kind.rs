//! Runtime kinds for values whose static type admits several shapes.

/// Names the concrete variant of a polymorphic value.
///
/// Implement this for enums (one name per variant) or for the concrete types
/// behind a trait object. Kind-checked matchers compare the kind of a
/// candidate with the kind of the expected value before inspecting it.
///
/// ```
/// use composite_matchers::Kind;
///
/// enum Figure {
///     Circle { radius: u32 },
///     Square { side: u32 },
/// }
///
/// impl Kind for Figure {
///     fn kind(&self) -> &'static str {
///         match self {
///             Figure::Circle { .. } => "Circle",
///             Figure::Square { .. } => "Square",
///         }
///     }
/// }
///
/// assert_eq!(Figure::Square { side: 2 }.kind(), "Square");
/// ```
pub trait Kind {
    fn kind(&self) -> &'static str;
}

