/*!
 * Monitoring
 * Structured diagnostic logging
 */

mod tracer;

pub use tracer::init_tracing;
