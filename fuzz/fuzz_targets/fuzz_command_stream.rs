#![no_main]

use libfuzzer_sys::fuzz_target;

use pass_persist::transport::StreamTransport;
use pass_persist::{Agent, Result, Triple, TripleSetBuilder};

fuzz_target!(|data: &[u8]| {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    let producer = |set: &mut TripleSetBuilder| -> Result<()> {
        set.push(Triple::new("1.3.6.1.4.1.8072.9999.1.0", "string", "one")?)?;
        set.push(Triple::new("1.3.6.1.4.1.8072.9999.2.0", "integer", 2)?)?;
        Ok(())
    };
    let agent = Agent::builder(producer).build().unwrap();

    // Any byte stream must end the session cleanly, never panic
    runtime.block_on(async {
        let transport = StreamTransport::new(data, Vec::new());
        let _ = agent.run(transport).await;
    });
});
