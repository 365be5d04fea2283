#![no_main]

use facadegen::{CancellationToken, Compilation, Generator, GeneratorConfig, SourceOutput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut compilation = Compilation::with_marker();
        compilation.add_source("fuzz.cs", s);
        let mut generator = Generator::new(GeneratorConfig::default());
        let _ = generator.execute(&compilation, &mut SourceOutput::new(), &CancellationToken::new());
    }
});
