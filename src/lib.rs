// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
# Example
Converts a one second delay segment into register values for a resampler
running from 1 GHz down to 900 MHz.

```rust
use fodm_gen::exact::integer;
use fodm_gen::{
    convert_segments, ConverterConfig, DelayRateModel, DelaySegment, PhaseConstantStrategy,
    RateConfig,
};

let rates = RateConfig::new(1_000_000_000, 900_000_000).unwrap();
let config = ConverterConfig::builder(rates, PhaseConstantStrategy::EpochSampleIndex)
    .rate_model(DelayRateModel::Additive)
    .build();
let segment = DelaySegment::new(integer(0), integer(0), integer(0), integer(1));

let records = convert_segments(config, &integer(0), vec![segment]).unwrap();
assert_eq!(records[0].validity_period, 899_999_999);
assert_eq!(records[0].output_pps, 0);
```
*/

#![deny(unsafe_code)]
#![warn(missing_docs)]

use log::debug;

pub use fodm_core::{
    config, delay, epoch, error, exact, phase, phase_model, pps, quantize, registers, segment,
    sequencer,
};
pub use fodm_core::{
    BigInt, BigRational, ContinuityCheck, ConverterConfig, ConverterConfigBuilder, DelayRateModel,
    DelaySegment, FodmError, FrequencyShift, OverflowPolicy, PhaseConstantStrategy, RateConfig,
    RegisterLayout, RegisterValues, Sequencer, SequencerCursor,
};

/// Convert an ordered list of segments into register records.
///
/// `start_time` is the run's reference start time in seconds; its whole
/// second becomes the epoch. Stops at the first failing segment.
pub fn convert_segments<S>(
    config: ConverterConfig,
    start_time: &BigRational,
    segments: S,
) -> Result<Vec<RegisterValues>, FodmError>
where
    S: IntoIterator<Item = DelaySegment>,
{
    let records = Sequencer::new(config, start_time, segments).collect_registers()?;
    debug!("converted {} segments", records.len());
    Ok(records)
}
