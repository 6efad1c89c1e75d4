//! Query options.

use abnf_runtime::GrammarBuilder;

/// System query options, each spelled with or without the `$` prefix.
const KEYWORDS: &[(&str, &str)] = &[
    ("expand", "expand"),
    ("filter", "filter"),
    ("format", "format"),
    ("inlinecount", "count"),
    ("levels", "levels"),
    ("orderby", "orderby"),
    ("select", "select"),
    ("skip", "skip"),
    ("top", "top"),
];

pub(super) fn define(b: &mut GrammarBuilder) {
    for &(rule, word) in KEYWORDS {
        let dollar = format!("\"${word}\"");
        let plain = format!("\"{word}\"");
        b.alternation(&format!("{rule}.keyword"), &[dollar.as_str(), plain.as_str()]);
    }

    b.sequence("queryOptions", &["queryOption", "*queryOptions.more"])
        .sequence("queryOptions.more", &["\"&\"", "queryOption"])
        .alternation(
            "queryOption",
            &["systemQueryOption", "aliasAndValue", "customQueryOption"],
        );

    // `skip` before `skiptoken` is fine: `$skip` followed by `token` fails
    // at the missing `=` and the alternation moves on.
    b.alternation(
        "systemQueryOption",
        &[
            "expand",
            "filter",
            "format",
            "inlinecount",
            "orderby",
            "select",
            "skip",
            "skiptoken",
            "top",
        ],
    );

    b.sequence("filter", &["filter.keyword", "EQ", "boolCommonExpr"])
        .sequence("skip", &["skip.keyword", "EQ", "1*DIGIT"])
        .sequence("top", &["top.keyword", "EQ", "1*DIGIT"])
        .sequence("skiptoken", &["\"$skiptoken\"", "EQ", "1*qchar-no-AMP"])
        .sequence("inlinecount", &["inlinecount.keyword", "EQ", "booleanValue"]);

    b.sequence("format", &["format.keyword", "EQ", "format.value"])
        .alternation(
            "format.value",
            &["\"atom\"", "\"json\"", "\"xml\"", "format.mediaType"],
        )
        .sequence("format.mediaType", &["1*unreserved", "\"/\"", "1*unreserved"]);

    b.sequence("orderby", &["orderby.keyword", "EQ", "orderbyItem", "*orderby.more"])
        .sequence("orderby.more", &["COMMA", "orderbyItem"])
        .sequence("orderbyItem", &["commonExpr", "[orderbyItem.direction]"])
        .sequence("orderbyItem.direction", &["RWS", "orderbyItem.order"])
        .alternation("orderbyItem.order", &["\"asc\"", "\"desc\""]);

    b.sequence("select", &["select.keyword", "EQ", "selectItem", "*select.more"])
        .sequence("select.more", &["COMMA", "selectItem"])
        .alternation("selectItem", &["STAR", "allOperationsInSchema", "selectPath"])
        .sequence("allOperationsInSchema", &["namespace", "\".\"", "STAR"])
        .sequence("selectPath", &["odataIdentifier", "*selectPath.segment"])
        .sequence("selectPath.segment", &["\"/\"", "odataIdentifier"]);

    b.sequence("expand", &["expand.keyword", "EQ", "expandItem", "*expand.more"])
        .sequence("expand.more", &["COMMA", "expandItem"])
        .alternation("expandItem", &["expandItem.star", "expandItem.path"])
        .sequence("expandItem.star", &["STAR", "[ref]"])
        .sequence("expandItem.path", &["expandPath", "[expandItem.suffix]"])
        .alternation("expandItem.suffix", &["ref", "count", "expandOptions"])
        .sequence("expandPath", &["navigationProperty", "*expandPath.segment"])
        .sequence("expandPath.segment", &["\"/\"", "navigationProperty"])
        .sequence(
            "expandOptions",
            &["OPEN", "expandOption", "*expandOptions.more", "CLOSE"],
        )
        .sequence("expandOptions.more", &["SEMI", "expandOption"])
        .alternation(
            "expandOption",
            &["filter", "orderby", "skip", "top", "inlinecount", "select", "expand", "levels"],
        );

    b.sequence("levels", &["levels.keyword", "EQ", "levels.value"])
        .alternation("levels.value", &["levels.count", "\"max\""])
        .sequence("levels.count", &["oneToNine", "*DIGIT"])
        .range("oneToNine", '1', '9');

    b.sequence("aliasAndValue", &["parameterAlias", "EQ", "parameterValue"])
        .sequence("parameterValue", &["commonExpr"]);

    b.sequence("customQueryOption", &["customName", "[customQueryOption.value]"])
        .sequence("customQueryOption.value", &["EQ", "customValue"])
        .sequence(
            "customName",
            &["qchar-no-AMP-EQ-AT-DOLLAR", "*qchar-no-AMP-EQ"],
        )
        .repeat("customValue", "qchar-no-AMP", 0, None);

    // Options allowed on `$batch` and `$metadata`.
    b.sequence("batchOptions", &["batchOption", "*batchOptions.more"])
        .sequence("batchOptions.more", &["\"&\"", "batchOption"])
        .alternation("batchOption", &["format", "customQueryOption"])
        .sequence("metadataOptions", &["metadataOption", "*metadataOptions.more"])
        .sequence("metadataOptions.more", &["\"&\"", "metadataOption"])
        .alternation("metadataOption", &["format", "customQueryOption"]);
}
