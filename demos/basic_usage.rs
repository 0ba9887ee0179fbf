// ============================================================================
// Basic Usage Example
// ============================================================================

use decimal_calc::numeric::format_plain;
use decimal_calc::prelude::*;
use std::sync::Arc;

fn main() {
    println!("=== Decimal Calculator Example ===\n");

    // Default evaluator: 16 significant digits, half-even
    let evaluator = Evaluator::new(PrecisionContext::DECIMAL64, Arc::new(LoggingEventHandler));

    println!("Evaluating expressions...");
    for expression in ["2+3*4", "(2+3)*4", "-(2+3)", "2*-3", "1/3", "5/2", "1.0+1"] {
        match evaluator.evaluate(expression) {
            Ok(value) => println!("  {:<10} = {}", expression, format_plain(value)),
            Err(err) => println!("  {:<10} ! {}", expression, err),
        }
    }

    println!("\n=== Failures ===");
    for expression in ["1/0", "(1+2", "2+a", "2+", "   "] {
        if let Err(err) = evaluator.evaluate(expression) {
            println!("  {:<10} {}: {}", format!("{:?}", expression), err.kind(), err);
        }
    }

    // Narrower precision
    println!("\n=== Precision ===");
    let narrow = Evaluator::with_context(PrecisionContext::DECIMAL32);
    for expression in ["2/3", "123456789*10"] {
        if let Ok(value) = narrow.evaluate(expression) {
            println!("  7 digits: {:<14} = {}", expression, format_plain(value));
        }
    }

    // Step trace
    println!("\n=== Evaluation Steps for 1 + 2 * (3 - 1) ===");
    let recorder = Arc::new(RecordingEventHandler::new());
    let traced = Evaluator::new(PrecisionContext::DECIMAL64, recorder.clone());
    let _ = traced.evaluate("1 + 2 * (3 - 1)");
    for event in recorder.take() {
        println!("  {}", event);
    }
}
