pub mod adc;
pub mod exti;
pub mod inputs;
pub mod led;
pub mod pins;
pub mod pwm;
pub mod usart;

pub use adc::AltitudeAdc;
pub use inputs::BoardInputs;
pub use led::Led;
pub use pins::BoardPins;
pub use pwm::Rotors;
pub use usart::Usart;
