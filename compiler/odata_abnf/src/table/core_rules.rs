//! RFC 5234 core rules, RFC 3986 URI characters and OData punctuation.

use abnf_runtime::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    // RFC 5234
    b.alternation("ALPHA", &["%x41-5A", "%x61-7A"])
        .range("DIGIT", '0', '9')
        .alternation("HEXDIG", &["DIGIT", "A-to-F"])
        .alternation(
            "A-to-F",
            &["\"A\"", "\"B\"", "\"C\"", "\"D\"", "\"E\"", "\"F\""],
        )
        .char("SP", ' ')
        .char("HTAB", '\t')
        .char("DQUOTE", '"');

    // RFC 3986
    b.alternation("unreserved", &["ALPHA", "DIGIT", "\"-\"", "\".\"", "\"_\"", "\"~\""])
        .sequence("pct-encoded", &["\"%\"", "HEXDIG", "HEXDIG"])
        .alternation(
            "other-delims",
            &["\"!\"", "\"(\"", "\")\"", "\"*\"", "\"+\"", "\",\"", "\";\""],
        )
        .alternation("sub-delims", &["\"$\"", "\"&\"", "\"'\"", "\"=\"", "other-delims"])
        .alternation(
            "pchar",
            &["unreserved", "pct-encoded", "sub-delims", "\":\"", "\"@\""],
        );

    // A percent-encoded octet that is not a single quote (`%27`), so that
    // quoted strings can tell an encoded quote from string content.
    b.sequence(
        "pct-encoded-no-SQUOTE",
        &["\"%\"", "pct-encoded-no-SQUOTE.high", "HEXDIG"],
    )
    .alternation(
        "pct-encoded-no-SQUOTE.high",
        &["\"0\"", "\"1\"", "\"3\"", "\"4\"", "\"5\"", "\"6\"", "\"8\"", "\"9\"", "A-to-F"],
    )
    .alternation(
        "pchar-no-SQUOTE",
        &[
            "unreserved",
            "pct-encoded-no-SQUOTE",
            "other-delims",
            "\"$\"",
            "\"&\"",
            "\"=\"",
            "\":\"",
            "\"@\"",
        ],
    );

    // Query characters
    b.alternation(
        "qchar-no-AMP",
        &[
            "unreserved",
            "pct-encoded",
            "other-delims",
            "\":\"",
            "\"@\"",
            "\"/\"",
            "\"?\"",
            "\"$\"",
            "\"'\"",
            "\"=\"",
        ],
    )
    .alternation(
        "qchar-no-AMP-EQ",
        &[
            "unreserved",
            "pct-encoded",
            "other-delims",
            "\":\"",
            "\"@\"",
            "\"/\"",
            "\"?\"",
            "\"$\"",
            "\"'\"",
        ],
    )
    .alternation(
        "qchar-no-AMP-EQ-AT-DOLLAR",
        &[
            "unreserved",
            "pct-encoded",
            "other-delims",
            "\":\"",
            "\"/\"",
            "\"?\"",
            "\"'\"",
        ],
    );

    // Punctuation
    b.alternation("whitespace", &["SP", "HTAB", "\"%20\"", "\"%09\""])
        .repeat("RWS", "whitespace", 1, None)
        .repeat("BWS", "whitespace", 0, None)
        .alternation("AT", &["\"@\"", "\"%40\""])
        .alternation("COLON", &["\":\"", "\"%3A\""])
        .alternation("COMMA", &["\",\"", "\"%2C\""])
        .sequence("EQ", &["\"=\""])
        .alternation("SIGN", &["\"+\"", "\"%2B\"", "\"-\""])
        .alternation("SEMI", &["\";\"", "\"%3B\""])
        .alternation("STAR", &["\"*\"", "\"%2A\""])
        .alternation("SQUOTE", &["\"'\"", "\"%27\""])
        .alternation("OPEN", &["\"(\"", "\"%28\""])
        .alternation("CLOSE", &["\")\"", "\"%29\""]);
}
