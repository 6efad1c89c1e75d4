//! `$filter` / `$orderby` expressions.
//!
//! An expression is an operand followed by optional arithmetic, comparison
//! and logical tails, each of whose right-hand side is again a whole
//! expression. The tree is therefore right-leaning: `a add b eq c` groups as
//! `a add (b eq c)`. Precedence is left to whoever consumes the tree.

use abnf_runtime::GrammarBuilder;

const ARITHMETIC: &[(&str, &str)] = &[
    ("addExpr", "add"),
    ("subExpr", "sub"),
    ("mulExpr", "mul"),
    ("divExpr", "div"),
    ("divbyExpr", "divby"),
    ("modExpr", "mod"),
];

const COMPARISON: &[(&str, &str)] = &[
    ("eqExpr", "eq"),
    ("neExpr", "ne"),
    ("ltExpr", "lt"),
    ("leExpr", "le"),
    ("gtExpr", "gt"),
    ("geExpr", "ge"),
];

const LOGICAL: &[(&str, &str)] = &[("andExpr", "and"), ("orExpr", "or")];

/// Method name and number of arguments.
const METHODS: &[(&str, &str, usize)] = &[
    ("containsMethodCallExpr", "contains", 2),
    ("startsWithMethodCallExpr", "startswith", 2),
    ("endsWithMethodCallExpr", "endswith", 2),
    ("indexOfMethodCallExpr", "indexof", 2),
    ("concatMethodCallExpr", "concat", 2),
    ("lengthMethodCallExpr", "length", 1),
    ("toLowerMethodCallExpr", "tolower", 1),
    ("toUpperMethodCallExpr", "toupper", 1),
    ("trimMethodCallExpr", "trim", 1),
];

pub(super) fn define(b: &mut GrammarBuilder) {
    b.sequence("boolCommonExpr", &["commonExpr"]).sequence(
        "commonExpr",
        &[
            "commonExpr.operand",
            "[commonExpr.arithmetic]",
            "[commonExpr.comparison]",
            "[commonExpr.logical]",
        ],
    );

    // Literals first so `true` and `null` are not read as property names;
    // method calls before members so `length(` is not either.
    b.alternation(
        "commonExpr.operand",
        &[
            "primitiveLiteral",
            "parenExpr",
            "notExpr",
            "negateExpr",
            "methodCallExpr",
            "parameterAlias",
            "firstMemberExpr",
        ],
    );

    binary(b, "commonExpr.arithmetic", ARITHMETIC, "commonExpr", &[]);
    binary(b, "commonExpr.comparison", COMPARISON, "commonExpr", &["inExpr"]);
    binary(b, "commonExpr.logical", LOGICAL, "boolCommonExpr", &[]);

    b.sequence("parenExpr", &["OPEN", "BWS", "commonExpr", "BWS", "CLOSE"])
        .sequence("notExpr", &["\"not\"", "RWS", "boolCommonExpr"])
        .sequence("negateExpr", &["\"-\"", "BWS", "commonExpr"])
        .sequence("inExpr", &["RWS", "\"in\"", "BWS", "listExpr"])
        .sequence(
            "listExpr",
            &["OPEN", "BWS", "commonExpr", "BWS", "*listExpr.more", "CLOSE"],
        )
        .sequence("listExpr.more", &["COMMA", "BWS", "commonExpr", "BWS"]);

    let methods: Vec<&str> = METHODS.iter().map(|&(rule, _, _)| rule).collect();
    b.alternation("methodCallExpr", &methods);
    for &(rule, name, arity) in METHODS {
        let keyword = format!("\"{name}\"");
        let mut members = vec![keyword.as_str(), "OPEN", "BWS", "commonExpr", "BWS"];
        for _ in 1..arity {
            members.extend(["COMMA", "BWS", "commonExpr", "BWS"]);
        }
        members.push("CLOSE");
        b.sequence(rule, &members);
    }

    b.sequence("firstMemberExpr", &["memberExpr"])
        .sequence("memberExpr", &["[memberExpr.cast]", "propertyPathExpr"])
        .sequence("memberExpr.cast", &["qualifiedEntityTypeName", "\"/\""])
        .sequence("propertyPathExpr", &["odataIdentifier", "*propertyPathExpr.segment"])
        .sequence("propertyPathExpr.segment", &["\"/\"", "propertyPathExpr.step"])
        .alternation("propertyPathExpr.step", &["anyExpr", "allExpr", "odataIdentifier"]);

    // Lambda operators over a collection-valued path.
    b.sequence("anyExpr", &["\"any\"", "OPEN", "BWS", "[lambda]", "BWS", "CLOSE"])
        .sequence("allExpr", &["\"all\"", "OPEN", "BWS", "lambda", "BWS", "CLOSE"])
        .sequence(
            "lambda",
            &["lambdaVariableExpr", "BWS", "COLON", "BWS", "lambdaPredicateExpr"],
        )
        .sequence("lambdaVariableExpr", &["odataIdentifier"])
        .sequence("lambdaPredicateExpr", &["boolCommonExpr"]);
}

/// `RWS keyword RWS operand` for each operator, plus the alternation over
/// them named `group`.
fn binary(
    b: &mut GrammarBuilder,
    group: &str,
    operators: &[(&str, &str)],
    operand: &str,
    extra: &[&str],
) {
    let mut alternatives: Vec<&str> = operators.iter().map(|&(rule, _)| rule).collect();
    alternatives.extend_from_slice(extra);
    b.alternation(group, &alternatives);

    for &(rule, keyword) in operators {
        let keyword = format!("\"{keyword}\"");
        b.sequence(rule, &["RWS", keyword.as_str(), "RWS", operand]);
    }
}
