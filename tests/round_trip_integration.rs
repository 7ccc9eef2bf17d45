//! Integration tests for compiling expressions and rendering criteria trees back into text

use membership_criteria::criteria::{KeyType, LeafValue, LogicalOperation};
use membership_criteria::{
    CachedResolver, CriteriaCompiler, CriteriaError, DirectoryResolver, Level1, ParseError, compile_dimension, compile_role, parse,
    render,
};

const AD_ID: &str = "2c9180835d2e5168015d32f890ca1581";

fn directory() -> DirectoryResolver {
    DirectoryResolver::from_pairs([
        ("Active Directory", AD_ID),
        ("Workday", "2c918086749d78830174a1a40e121518"),
        ("O'Brien HR", "2c918087a1b2c3d4e5f60718293a4b5c"),
    ])
}

async fn compile(text: &str) -> Level1 {
    compile_role(text, directory()).await.unwrap_or_else(|e| panic!("compiling {text}: {e}"))
}

async fn render_text(tree: &Level1) -> String {
    render(tree, &directory().inverted()).await.unwrap()
}

const VALID_EXPRESSIONS: &[&str] = &[
    r#"identity.department eq "Accounting""#,
    r#"'Active Directory'.entitlement.memberOf eq "CN=Accounting,OU=Groups""#,
    r#"(identity.department eq 'Accounting') and ('Active Directory'.entitlement.memberOf eq "CN=X")"#,
    "identity.a eq '1' or identity.b ne '2' or 'Workday'.attribute.c co '3'",
    "identity.a sw '1' and identity.b ew '2' and identity.c nc '3'",
    "(identity.a eq '1' and identity.b eq '2') or (identity.c eq '3' and identity.d eq '4')",
    "(identity.a eq '1' or identity.b eq '2') and identity.c eq '3'",
    "identity.location in ('Berlin', 'Paris') and identity.type eq 'Employee'",
    r#"'O''Brien HR'.attribute.lastName eq "O'Neil""#,
    "IDENTITY.grade GE '5' AND identity.grade LT '9'",
    "identity.title eq ''",
    "identity.'first name' eq 'x'",
    "identity.'' eq 1",
    "'Workday'.attribute.'cost.center' eq '7' or 'Active Directory'.entitlement.'member of' co 'Ops'",
    "(identity.name eq O'Brien and identity.z eq 'w') or (identity.x eq 'y' and identity.q eq 'r')",
];

#[tokio::test]
async fn test_render_then_compile_reproduces_tree() {
    for text in VALID_EXPRESSIONS {
        let tree = compile(text).await;
        let rendered = render_text(&tree).await;
        let again = compile(&rendered).await;
        assert_eq!(again, tree, "{text} rendered as {rendered}");
    }
}

#[tokio::test]
async fn test_rendering_is_stable() {
    for text in VALID_EXPRESSIONS {
        let rendered = render_text(&compile(text).await).await;
        let rerendered = render_text(&compile(&rendered).await).await;
        assert_eq!(rerendered, rendered, "{text}");
    }
}

#[tokio::test]
async fn test_quoted_property_renders_quoted() {
    let tree = compile("identity.'first name' eq 'x'").await;
    assert_eq!(tree.children[0].children[0].key.property, "attribute.first name");
    assert_eq!(render_text(&tree).await, "identity.'first name' eq 'x'");
}

#[tokio::test]
async fn test_single_comparison_is_or_of_and() {
    let tree = compile(r#"identity.department eq "Accounting""#).await;
    assert_eq!(tree.operation, LogicalOperation::Or);
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].operation, LogicalOperation::And);

    let leaf = &tree.children[0].children[0];
    assert_eq!(leaf.key.key_type, KeyType::Identity);
    assert_eq!(leaf.key.property, "attribute.department");
    assert_eq!(leaf.key.source_id, None);
    assert_eq!(leaf.value, LeafValue::Single("Accounting".to_string()));
}

#[tokio::test]
async fn test_one_level_root_is_the_complement() {
    let and_tree = compile("identity.a eq '1' and identity.b eq '2'").await;
    assert_eq!(and_tree.operation, LogicalOperation::Or);

    let or_tree = compile("identity.a eq '1' or identity.b eq '2'").await;
    assert_eq!(or_tree.operation, LogicalOperation::And);
}

#[tokio::test]
async fn test_grouped_and_renders_as_two_leaf_and() {
    let text = r#"(identity.department eq 'Accounting') and ('Active Directory'.entitlement.memberOf eq "CN=X")"#;
    let tree = compile(text).await;
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].children.len(), 2);
    assert_eq!(tree.children[0].children[1].key.source_id.as_deref(), Some(AD_ID));

    assert_eq!(
        render_text(&tree).await,
        "identity.department eq 'Accounting' and 'Active Directory'.entitlement.memberOf eq 'CN=X'"
    );
}

#[tokio::test]
async fn test_mixed_connectives_are_rejected() {
    let text = r#"identity.department eq "Accounting" and 'X'.attribute.y eq "1" or 'X'.attribute.z eq "2""#;
    assert!(matches!(parse(text), Err(ParseError::MixedLogicalOperators { .. })));

    let err = compile_role(text, directory()).await.unwrap_err();
    assert!(matches!(err, CriteriaError::Parse(_)), "{err:?}");
}

#[test]
fn test_unbalanced_input_is_rejected() {
    for text in [
        "(identity.a eq '1'",
        "identity.a eq '1')",
        "identity.a eq 'unterminated",
        r#"'Workday.attribute.a eq "1""#,
        "identity.a in ('x', 'y'",
        "",
        "   ",
    ] {
        assert!(parse(text).is_err(), "{text:?} should not parse");
    }
}

#[tokio::test]
async fn test_three_levels_are_rejected_before_resolving() {
    let resolver = CachedResolver::new(directory());
    let text = "((identity.a eq '1' and 'Workday'.attribute.b eq '2') or (identity.c eq '3' and identity.d eq '4')) and identity.e eq '5'";
    let expression = parse(text).unwrap();

    let err = CriteriaCompiler::role(&resolver).compile(&expression).await.unwrap_err();
    assert!(matches!(err, CriteriaError::Schema(_)), "{err:?}");
    assert_eq!(resolver.lookups(), 0);
}

#[tokio::test]
async fn test_dimension_rejects_value_lists() {
    let err = compile_dimension("identity.location in ('Berlin', 'Paris')", directory())
        .await
        .unwrap_err();
    assert!(matches!(err, CriteriaError::Schema(_)), "{err:?}");

    let tree = compile_dimension("identity.location eq 'Berlin'", directory()).await.unwrap();
    assert_eq!(tree.children[0].children[0].value, LeafValue::Single("Berlin".to_string()));
}

#[tokio::test]
async fn test_wire_json_round_trips_through_render() {
    let tree = compile("(identity.a eq '1' and 'Workday'.attribute.b eq '2') or identity.c in ('x','y')").await;
    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.contains(r#""sourceId":"2c918086749d78830174a1a40e121518""#), "{json}");
    assert!(json.contains(r#""values":["x","y"]"#), "{json}");

    let decoded: Level1 = serde_json::from_str(&json).unwrap();
    assert_eq!(render_text(&decoded).await, render_text(&tree).await);
}

#[tokio::test]
async fn test_shared_resolver_across_a_batch() {
    let resolver = CachedResolver::new(directory());
    let compiler = CriteriaCompiler::role(&resolver);

    for text in [
        "'Workday'.attribute.a eq '1'",
        "'Workday'.attribute.b eq '2' and 'Active Directory'.entitlement.c eq '3'",
        "'Active Directory'.entitlement.d eq '4'",
    ] {
        _ = compiler.compile(&parse(text).unwrap()).await.unwrap();
    }

    assert_eq!(resolver.lookups(), 2);
}
