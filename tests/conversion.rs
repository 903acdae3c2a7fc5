// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use fodm_gen::exact::{integer, parse_decimal};
use fodm_gen::{
    convert_segments, BigRational, ContinuityCheck, ConverterConfig, DelayRateModel,
    DelaySegment, FodmError, FrequencyShift, PhaseConstantStrategy, RateConfig, RegisterLayout,
    RegisterValues, Sequencer,
};

fn dec(text: &str) -> BigRational {
    parse_decimal(text).unwrap()
}

fn test_signal_config(layout: RegisterLayout, model: DelayRateModel) -> ConverterConfig {
    let rates = RateConfig::new(1_000_000_000, 900_000_000).unwrap();
    ConverterConfig::builder(rates, PhaseConstantStrategy::EpochSampleIndex)
        .layout(layout)
        .rate_model(model)
        .build()
}

fn one_second() -> DelaySegment {
    DelaySegment::new(integer(0), integer(0), integer(0), integer(1))
}

#[test]
fn test_one_second_ten_ninths_additive_wide() {
    let config = test_signal_config(RegisterLayout::Wide, DelayRateModel::Additive);
    let records = convert_segments(config, &integer(0), vec![one_second()]).unwrap();
    assert_eq!(
        records,
        vec![RegisterValues {
            first_input_timestamp: 0,
            delay_constant: 0,
            phase_constant: 0,
            delay_linear: 10_248_191_152_060_862_009,
            phase_linear: 0,
            validity_period: 899_999_999,
            output_pps: 0,
            first_output_timestamp: 0,
        }]
    );
}

#[test]
fn test_one_second_ten_ninths_multiplicative_narrow() {
    let config = test_signal_config(RegisterLayout::Narrow, DelayRateModel::Multiplicative);
    let records = convert_segments(config, &integer(0), vec![one_second()]).unwrap();
    assert_eq!(records[0].delay_linear, 2_386_092_942);
    assert_eq!(records[0].delay_constant, 200_000_000);
    assert_eq!(records[0].validity_period, 899_999_999);
    assert_eq!(records[0].output_pps, 0);
}

#[test]
fn test_segment_longer_than_one_second_is_rejected() {
    let config = test_signal_config(RegisterLayout::Wide, DelayRateModel::Additive);
    let segment = DelaySegment::new(integer(0), integer(0), integer(0), dec("1.000000002"));
    let err = convert_segments(config, &integer(0), vec![segment]).unwrap_err();
    assert_eq!(
        err,
        FodmError::InvalidSegmentDuration {
            start_sample: 0.into(),
            stop_sample: 900_000_001.into(),
            max_samples: 900_000_000,
        }
    );
}

#[test]
fn test_no_frequency_shift_gives_zero_phase() {
    let rates = RateConfig::new(220_061_800, 220_200_960).unwrap();
    let config = ConverterConfig::builder(rates, PhaseConstantStrategy::AbsoluteTime).build();
    let segment = DelaySegment::from_model_units(
        dec("-84141.202861"),
        dec("-9.034271527"),
        dec("770535685740"),
        dec("770535685750"),
    );
    let records = convert_segments(config, &dec("770535682"), vec![segment]).unwrap();
    assert_eq!(records[0].phase_constant, 0);
    assert_eq!(records[0].phase_linear, 0);
}

fn slice_case(
    layout: RegisterLayout,
    strategy: PhaseConstantStrategy,
    model: DelayRateModel,
    redistribute: bool,
) -> RegisterValues {
    let rates = RateConfig::new(220_000_000, 220_200_960).unwrap();
    let config = ConverterConfig::builder(rates, strategy)
        .layout(layout)
        .rate_model(model)
        .redistribute_rate_error(redistribute)
        .frequency_shift(FrequencyShift::Slice {
            index: 3,
            f_wb: integer(0),
            f_as: integer(1_000),
        })
        .build();
    let segment = DelaySegment::new(
        dec("1.23456789e-4"),
        dec("2.5e-9"),
        dec("100.2512345"),
        dec("100.2612345"),
    );
    convert_segments(config, &dec("100.2"), vec![segment]).unwrap()[0]
}

#[test]
fn test_slice_shift_phase_constant_strategies() {
    let wide = |strategy| {
        slice_case(RegisterLayout::Wide, strategy, DelayRateModel::Multiplicative, true)
    };
    let absolute = wide(PhaseConstantStrategy::AbsoluteTime);
    let epoch = wide(PhaseConstantStrategy::EpochSampleIndex);
    let shift_only = wide(PhaseConstantStrategy::EpochSampleIndexShiftOnly);

    assert_eq!(absolute.phase_constant, 576_260_057);
    assert_eq!(epoch.phase_constant, 304_159_621);
    assert_eq!(shift_only.phase_constant, 576_711_305);
    for values in [absolute, epoch, shift_only] {
        assert_eq!(values.first_input_timestamp, 22_055_298_750);
        assert_eq!(values.delay_constant, 1_754_655_985);
        assert_eq!(values.delay_linear, 9_214_954_617_731_481_725);
        assert_eq!(values.phase_linear, -22_768_917_790_142_634);
        assert_eq!(values.validity_period, 2_202_008);
        assert_eq!(values.output_pps, 765_460_480);
        assert_eq!(values.first_output_timestamp, 22_075_418_078);
    }
}

#[test]
fn test_slice_shift_narrow_layout() {
    let values = slice_case(
        RegisterLayout::Narrow,
        PhaseConstantStrategy::EpochSampleIndex,
        DelayRateModel::Multiplicative,
        true,
    );
    assert_eq!(
        values,
        RegisterValues {
            first_input_timestamp: 22_055_298_750,
            delay_constant: 1_754_408_521,
            phase_constant: 304_159_621,
            delay_linear: 2_145_523_815,
            phase_linear: -5_301_302,
            validity_period: 2_202_008,
            output_pps: 765_460_480,
            first_output_timestamp: 22_075_418_078,
        }
    );
}

#[test]
fn test_additive_without_redistribution() {
    let values = slice_case(
        RegisterLayout::Wide,
        PhaseConstantStrategy::EpochSampleIndex,
        DelayRateModel::Additive,
        false,
    );
    assert_eq!(values.delay_constant, 1_754_655_985);
    assert_eq!(values.delay_linear, 9_214_954_617_752_525_330);
    assert_eq!(values.phase_constant, 304_159_621);
}

#[test]
fn test_redistribution_moves_delay_constant() {
    let rates = RateConfig::new(1_000_000_000, 900_000_000).unwrap();
    let convert = |redistribute| {
        let config = ConverterConfig::builder(rates, PhaseConstantStrategy::EpochSampleIndex)
            .layout(RegisterLayout::Narrow)
            .redistribute_rate_error(redistribute)
            .build();
        convert_segments(config, &integer(0), vec![one_second()]).unwrap()[0]
    };
    let with = convert(true);
    let without = convert(false);
    assert_eq!(with.delay_constant, 200_000_000);
    assert_eq!(without.delay_constant, 0);
    assert_eq!(with.first_input_timestamp, without.first_input_timestamp);
    assert_eq!(with.delay_linear, without.delay_linear);
}

#[test]
fn test_contiguous_segments_chain_output_timestamps() {
    let rates = RateConfig::new(220_061_800, 220_200_960).unwrap();
    let config = ConverterConfig::builder(rates, PhaseConstantStrategy::EpochSampleIndex)
        .continuity(ContinuityCheck::Require)
        .build();
    let segments: Vec<DelaySegment> = (0..5)
        .map(|i| {
            DelaySegment::from_model_units(
                dec("-84141.202861"),
                dec("-9.034271527"),
                integer(770_535_682_000i64 + i * 10),
                integer(770_535_682_010i64 + i * 10),
            )
        })
        .collect();

    let mut previous: Option<RegisterValues> = None;
    let mut count = 0;
    for item in Sequencer::new(config, &dec("770535682"), segments) {
        let (values, cursor) = item.unwrap();
        count += 1;
        assert_eq!(cursor.segments(), count);
        if let Some(prev) = previous {
            assert_eq!(
                values.first_output_timestamp,
                prev.first_output_timestamp + prev.validity_period_samples()
            );
        }
        previous = Some(values);
    }
    assert_eq!(count, 5);
}

#[test]
fn test_restart_reproduces_records() {
    let config = test_signal_config(RegisterLayout::Narrow, DelayRateModel::Multiplicative);
    let first = convert_segments(config.clone(), &integer(0), vec![one_second()]).unwrap();
    let second = convert_segments(config, &integer(0), vec![one_second()]).unwrap();
    assert_eq!(first, second);
}
