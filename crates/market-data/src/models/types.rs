use std::borrow::Cow;

/// Provider identifier - mostly static constants ("FRED", "YAHOO", "STATIC")
pub type ProviderId = Cow<'static, str>;
