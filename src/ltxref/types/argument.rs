//! Argument kinds and their wire tokens.

/// The shape of a single command or environment argument.
///
/// `Unset` is the zero value. It is what an unknown or missing `type`
/// token decodes to, and it encodes as an empty token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArgumentType {
    #[default]
    Unset,
    /// `{...}`
    MandatorySingle,
    /// `{...,...,...}`
    MandatoryList,
    /// `[...]`
    OptionalSingle,
    /// `[...,...,...]`
    OptionalList,
    /// `to <dimen>` or `spread <dimen>`, as taken by `\hbox` and friends.
    DimensionOrSpreadDimension,
}

impl ArgumentType {
    /// All known kinds, in wire order.
    pub const ALL: [ArgumentType; 5] = [
        ArgumentType::MandatorySingle,
        ArgumentType::MandatoryList,
        ArgumentType::OptionalSingle,
        ArgumentType::OptionalList,
        ArgumentType::DimensionOrSpreadDimension,
    ];

    /// Canonical lowercase token used in the `type` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentType::Unset => "",
            ArgumentType::MandatorySingle => "mandarg",
            ArgumentType::MandatoryList => "mandlist",
            ArgumentType::OptionalSingle => "optarg",
            ArgumentType::OptionalList => "optlist",
            ArgumentType::DimensionOrSpreadDimension => "todimenorspreaddimen",
        }
    }

    /// Parses a wire token. Unknown tokens map to [`ArgumentType::Unset`].
    pub fn from_token(token: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == token)
            .unwrap_or_default()
    }

    pub fn is_unset(&self) -> bool {
        *self == ArgumentType::Unset
    }
}

