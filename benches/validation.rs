//! Benchmarks for the response checking hot paths

use conformance::checks::{
    check_structured, check_tool_call, resolve, SemanticCheck, StructuredExpectation,
    ToolCallMode, ToolExpectation,
};
use conformance::gateway::{CompletionResponse, ResponseMessage, ToolArguments};
use conformance::scenario::definitions::{calculate_tool, math_reasoning_contract};
use conformance::schema::validate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

fn math_answer(steps: usize) -> Value {
    let steps: Vec<Value> = (0..steps)
        .map(|i| json!({"explanation": format!("step {}", i), "output": format!("x_{} = {}", i, i)}))
        .collect();
    json!({"steps": steps, "final_answer": "x = -3.75"})
}

fn bench_schema_validate(c: &mut Criterion) {
    let contract = math_reasoning_contract();
    let small = math_answer(3);
    let large = math_answer(200);

    c.bench_function("schema_validate_3_steps", |b| {
        b.iter(|| validate(black_box(&small), black_box(&contract)))
    });
    c.bench_function("schema_validate_200_steps", |b| {
        b.iter(|| validate(black_box(&large), black_box(&contract)))
    });
}

fn bench_structured_check(c: &mut Criterion) {
    let expected = StructuredExpectation {
        contract: math_reasoning_contract(),
        semantic: vec![SemanticCheck::non_empty("/steps")],
    };
    let response =
        CompletionResponse::from_message(ResponseMessage::text(math_answer(10).to_string()));

    c.bench_function("check_structured_10_steps", |b| {
        b.iter(|| check_structured(black_box(&response), black_box(&expected)))
    });
}

fn bench_tool_arguments(c: &mut Criterion) {
    let expected = ToolExpectation::from_declaration(&calculate_tool());
    let encoded = ToolArguments::Encoded(r#"{"expression": "23+45"}"#.to_string());
    let response = CompletionResponse::from_message(ResponseMessage::tool_call(
        "calculate",
        encoded.clone(),
    ));

    c.bench_function("resolve_encoded_arguments", |b| {
        b.iter(|| resolve(black_box(&encoded)))
    });
    c.bench_function("check_tool_call_encoded", |b| {
        b.iter(|| {
            check_tool_call(
                black_box(&response),
                black_box(&expected),
                ToolCallMode::Lenient,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_schema_validate,
    bench_structured_check,
    bench_tool_arguments
);
criterion_main!(benches);
