pub mod decode;
pub mod encode;
pub mod schemes;

use stegosuite_core::Failure;

fn report_failure(failure: &Failure) -> bool {
    eprintln!("Error: {}", failure.message());
    false
}
