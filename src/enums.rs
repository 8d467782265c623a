//! Host-facing typed enums and flag sets.
//!
//! Each enum carries the raw value of its C counterpart; `to_raw`/`from_raw`
//! are the only places the numeric contract appears. `from_raw` is total
//! over the values the bound headers define and `None` past them, so a newer
//! native library reporting values this crate does not know about degrades
//! to a skipped entry instead of undefined behavior.

use bitflags::bitflags;

macro_rules! wgpu_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            pub(crate) fn to_raw(self) -> u32 {
                self as u32
            }

            pub(crate) fn from_raw(raw: u32) -> Option<Self> {
                match raw {
                    $( $value => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

wgpu_enum! {
    pub enum AdapterType {
        DiscreteGpu = 0,
        IntegratedGpu = 1,
        Cpu = 2,
        Unknown = 3,
    }
}

wgpu_enum! {
    pub enum BackendType {
        Null = 0,
        WebGpu = 1,
        D3D11 = 2,
        D3D12 = 3,
        Metal = 4,
        Vulkan = 5,
        OpenGl = 6,
        OpenGlEs = 7,
    }
}

wgpu_enum! {
    pub enum PowerPreference {
        Undefined = 0,
        LowPower = 1,
        HighPerformance = 2,
    }
}

wgpu_enum! {
    pub enum PresentMode {
        Immediate = 0,
        Mailbox = 1,
        Fifo = 2,
    }
}

wgpu_enum! {
    pub enum AddressMode {
        Repeat = 0,
        MirrorRepeat = 1,
        ClampToEdge = 2,
    }
}

wgpu_enum! {
    pub enum FilterMode {
        Nearest = 0,
        Linear = 1,
    }
}

wgpu_enum! {
    pub enum MipmapFilterMode {
        Nearest = 0,
        Linear = 1,
    }
}

wgpu_enum! {
    pub enum CompareFunction {
        Undefined = 0,
        Never = 1,
        Less = 2,
        LessEqual = 3,
        Greater = 4,
        GreaterEqual = 5,
        Equal = 6,
        NotEqual = 7,
        Always = 8,
    }
}

wgpu_enum! {
    pub enum BufferBindingType {
        Undefined = 0,
        Uniform = 1,
        Storage = 2,
        ReadOnlyStorage = 3,
    }
}

wgpu_enum! {
    pub enum SamplerBindingType {
        Undefined = 0,
        Filtering = 1,
        NonFiltering = 2,
        Comparison = 3,
    }
}

wgpu_enum! {
    pub enum TextureSampleType {
        Undefined = 0,
        Float = 1,
        UnfilterableFloat = 2,
        Depth = 3,
        Sint = 4,
        Uint = 5,
    }
}

wgpu_enum! {
    pub enum StorageTextureAccess {
        Undefined = 0,
        WriteOnly = 1,
    }
}

wgpu_enum! {
    pub enum TextureAspect {
        All = 0,
        StencilOnly = 1,
        DepthOnly = 2,
    }
}

wgpu_enum! {
    pub enum TextureDimension {
        D1 = 0,
        D2 = 1,
        D3 = 2,
    }
}

wgpu_enum! {
    pub enum TextureViewDimension {
        Undefined = 0,
        D1 = 1,
        D2 = 2,
        D2Array = 3,
        Cube = 4,
        CubeArray = 5,
        D3 = 6,
    }
}

wgpu_enum! {
    pub enum PrimitiveTopology {
        PointList = 0,
        LineList = 1,
        LineStrip = 2,
        TriangleList = 3,
        TriangleStrip = 4,
    }
}

wgpu_enum! {
    pub enum FrontFace {
        Ccw = 0,
        Cw = 1,
    }
}

wgpu_enum! {
    pub enum CullMode {
        None = 0,
        Front = 1,
        Back = 2,
    }
}

wgpu_enum! {
    pub enum IndexFormat {
        Undefined = 0,
        Uint16 = 1,
        Uint32 = 2,
    }
}

wgpu_enum! {
    pub enum VertexStepMode {
        Vertex = 0,
        Instance = 1,
    }
}

wgpu_enum! {
    pub enum BlendFactor {
        Zero = 0,
        One = 1,
        Src = 2,
        OneMinusSrc = 3,
        SrcAlpha = 4,
        OneMinusSrcAlpha = 5,
        Dst = 6,
        OneMinusDst = 7,
        DstAlpha = 8,
        OneMinusDstAlpha = 9,
        SrcAlphaSaturated = 10,
        Constant = 11,
        OneMinusConstant = 12,
    }
}

wgpu_enum! {
    pub enum BlendOperation {
        Add = 0,
        Subtract = 1,
        ReverseSubtract = 2,
        Min = 3,
        Max = 4,
    }
}

wgpu_enum! {
    pub enum StencilOperation {
        Keep = 0,
        Zero = 1,
        Replace = 2,
        Invert = 3,
        IncrementClamp = 4,
        DecrementClamp = 5,
        IncrementWrap = 6,
        DecrementWrap = 7,
    }
}

wgpu_enum! {
    pub enum LoadOp {
        Undefined = 0,
        Clear = 1,
        Load = 2,
    }
}

wgpu_enum! {
    pub enum StoreOp {
        Undefined = 0,
        Store = 1,
        Discard = 2,
    }
}

wgpu_enum! {
    pub enum FeatureName {
        Undefined = 0,
        DepthClipControl = 1,
        Depth24UnormStencil8 = 2,
        Depth32FloatStencil8 = 3,
        TimestampQuery = 4,
        PipelineStatisticsQuery = 5,
        TextureCompressionBc = 6,
        TextureCompressionEtc2 = 7,
        TextureCompressionAstc = 8,
        IndirectFirstInstance = 9,
    }
}

wgpu_enum! {
    pub enum VertexFormat {
        Uint8x2 = 1,
        Uint8x4 = 2,
        Sint8x2 = 3,
        Sint8x4 = 4,
        Unorm8x2 = 5,
        Unorm8x4 = 6,
        Snorm8x2 = 7,
        Snorm8x4 = 8,
        Uint16x2 = 9,
        Uint16x4 = 10,
        Sint16x2 = 11,
        Sint16x4 = 12,
        Unorm16x2 = 13,
        Unorm16x4 = 14,
        Snorm16x2 = 15,
        Snorm16x4 = 16,
        Float16x2 = 17,
        Float16x4 = 18,
        Float32 = 19,
        Float32x2 = 20,
        Float32x3 = 21,
        Float32x4 = 22,
        Uint32 = 23,
        Uint32x2 = 24,
        Uint32x3 = 25,
        Uint32x4 = 26,
        Sint32 = 27,
        Sint32x2 = 28,
        Sint32x3 = 29,
        Sint32x4 = 30,
    }
}

impl VertexFormat {
    /// Byte size of one attribute of this format.
    pub fn size(self) -> u64 {
        match self {
            Self::Uint8x2 | Self::Sint8x2 | Self::Unorm8x2 | Self::Snorm8x2 => 2,
            Self::Uint8x4
            | Self::Sint8x4
            | Self::Unorm8x4
            | Self::Snorm8x4
            | Self::Uint16x2
            | Self::Sint16x2
            | Self::Unorm16x2
            | Self::Snorm16x2
            | Self::Float16x2
            | Self::Float32
            | Self::Uint32
            | Self::Sint32 => 4,
            Self::Uint16x4
            | Self::Sint16x4
            | Self::Unorm16x4
            | Self::Snorm16x4
            | Self::Float16x4
            | Self::Float32x2
            | Self::Uint32x2
            | Self::Sint32x2 => 8,
            Self::Float32x3 | Self::Uint32x3 | Self::Sint32x3 => 12,
            Self::Float32x4 | Self::Uint32x4 | Self::Sint32x4 => 16,
        }
    }
}

wgpu_enum! {
    pub enum TextureFormat {
        Undefined = 0,
        R8Unorm = 1,
        R8Snorm = 2,
        R8Uint = 3,
        R8Sint = 4,
        R16Uint = 5,
        R16Sint = 6,
        R16Float = 7,
        Rg8Unorm = 8,
        Rg8Snorm = 9,
        Rg8Uint = 10,
        Rg8Sint = 11,
        R32Float = 12,
        R32Uint = 13,
        R32Sint = 14,
        Rg16Uint = 15,
        Rg16Sint = 16,
        Rg16Float = 17,
        Rgba8Unorm = 18,
        Rgba8UnormSrgb = 19,
        Rgba8Snorm = 20,
        Rgba8Uint = 21,
        Rgba8Sint = 22,
        Bgra8Unorm = 23,
        Bgra8UnormSrgb = 24,
        Rgb10a2Unorm = 25,
        Rg11b10Ufloat = 26,
        Rgb9e5Ufloat = 27,
        Rg32Float = 28,
        Rg32Uint = 29,
        Rg32Sint = 30,
        Rgba16Uint = 31,
        Rgba16Sint = 32,
        Rgba16Float = 33,
        Rgba32Float = 34,
        Rgba32Uint = 35,
        Rgba32Sint = 36,
        Stencil8 = 37,
        Depth16Unorm = 38,
        Depth24Plus = 39,
        Depth24PlusStencil8 = 40,
        Depth24UnormStencil8 = 41,
        Depth32Float = 42,
        Depth32FloatStencil8 = 43,
        Bc1RgbaUnorm = 44,
        Bc1RgbaUnormSrgb = 45,
        Bc2RgbaUnorm = 46,
        Bc2RgbaUnormSrgb = 47,
        Bc3RgbaUnorm = 48,
        Bc3RgbaUnormSrgb = 49,
        Bc4RUnorm = 50,
        Bc4RSnorm = 51,
        Bc5RgUnorm = 52,
        Bc5RgSnorm = 53,
        Bc6hRgbUfloat = 54,
        Bc6hRgbFloat = 55,
        Bc7RgbaUnorm = 56,
        Bc7RgbaUnormSrgb = 57,
        Etc2Rgb8Unorm = 58,
        Etc2Rgb8UnormSrgb = 59,
        Etc2Rgb8A1Unorm = 60,
        Etc2Rgb8A1UnormSrgb = 61,
        Etc2Rgba8Unorm = 62,
        Etc2Rgba8UnormSrgb = 63,
        EacR11Unorm = 64,
        EacR11Snorm = 65,
        EacRg11Unorm = 66,
        EacRg11Snorm = 67,
        Astc4x4Unorm = 68,
        Astc4x4UnormSrgb = 69,
        Astc5x4Unorm = 70,
        Astc5x4UnormSrgb = 71,
        Astc5x5Unorm = 72,
        Astc5x5UnormSrgb = 73,
        Astc6x5Unorm = 74,
        Astc6x5UnormSrgb = 75,
        Astc6x6Unorm = 76,
        Astc6x6UnormSrgb = 77,
        Astc8x5Unorm = 78,
        Astc8x5UnormSrgb = 79,
        Astc8x6Unorm = 80,
        Astc8x6UnormSrgb = 81,
        Astc8x8Unorm = 82,
        Astc8x8UnormSrgb = 83,
        Astc10x5Unorm = 84,
        Astc10x5UnormSrgb = 85,
        Astc10x6Unorm = 86,
        Astc10x6UnormSrgb = 87,
        Astc10x8Unorm = 88,
        Astc10x8UnormSrgb = 89,
        Astc10x10Unorm = 90,
        Astc10x10UnormSrgb = 91,
        Astc12x10Unorm = 92,
        Astc12x10UnormSrgb = 93,
        Astc12x12Unorm = 94,
        Astc12x12UnormSrgb = 95,
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BufferUsages: u32 {
        const MAP_READ = 1 << 0;
        const MAP_WRITE = 1 << 1;
        const COPY_SRC = 1 << 2;
        const COPY_DST = 1 << 3;
        const INDEX = 1 << 4;
        const VERTEX = 1 << 5;
        const UNIFORM = 1 << 6;
        const STORAGE = 1 << 7;
        const INDIRECT = 1 << 8;
        const QUERY_RESOLVE = 1 << 9;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureUsages: u32 {
        const COPY_SRC = 1 << 0;
        const COPY_DST = 1 << 1;
        const TEXTURE_BINDING = 1 << 2;
        const STORAGE_BINDING = 1 << 3;
        const RENDER_ATTACHMENT = 1 << 4;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShaderStages: u32 {
        const VERTEX = 1 << 0;
        const FRAGMENT = 1 << 1;
        const COMPUTE = 1 << 2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWrites: u32 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
        const ALL = 0xF;
    }
}

impl Default for ColorWrites {
    fn default() -> Self {
        Self::ALL
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapMode: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

bitflags! {
    /// wgpu-native extension features, requested through the device extras
    /// chain rather than the standard feature list.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NativeFeatures: u32 {
        const TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES = 0x1000_0000;
    }
}

impl Default for PowerPreference {
    fn default() -> Self {
        Self::Undefined
    }
}

impl Default for PrimitiveTopology {
    fn default() -> Self {
        Self::TriangleList
    }
}

impl Default for IndexFormat {
    fn default() -> Self {
        Self::Undefined
    }
}

impl Default for FrontFace {
    fn default() -> Self {
        Self::Ccw
    }
}

impl Default for CullMode {
    fn default() -> Self {
        Self::None
    }
}

impl Default for CompareFunction {
    fn default() -> Self {
        Self::Undefined
    }
}

impl CompareFunction {
    /// Whether this value actually enables a comparison.
    pub fn is_defined(self) -> bool {
        self != Self::Undefined
    }
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::Nearest
    }
}

impl Default for MipmapFilterMode {
    fn default() -> Self {
        Self::Nearest
    }
}

impl Default for AddressMode {
    fn default() -> Self {
        Self::ClampToEdge
    }
}

impl Default for StencilOperation {
    fn default() -> Self {
        Self::Keep
    }
}

impl Default for TextureDimension {
    fn default() -> Self {
        Self::D2
    }
}

impl Default for TextureViewDimension {
    fn default() -> Self {
        Self::Undefined
    }
}

impl Default for TextureAspect {
    fn default() -> Self {
        Self::All
    }
}

impl Default for TextureSampleType {
    fn default() -> Self {
        Self::Undefined
    }
}

impl Default for VertexStepMode {
    fn default() -> Self {
        Self::Vertex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip_holds_for_spot_checked_values() {
        assert_eq!(TextureFormat::Bgra8UnormSrgb.to_raw(), 24);
        assert_eq!(TextureFormat::from_raw(24), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(TextureFormat::Depth32Float.to_raw(), 42);
        assert_eq!(TextureFormat::Astc12x12UnormSrgb.to_raw(), 95);
        assert_eq!(TextureFormat::from_raw(96), None);
        assert_eq!(BlendFactor::OneMinusConstant.to_raw(), 12);
        assert_eq!(VertexFormat::Sint32x4.to_raw(), 30);
        assert_eq!(CompareFunction::Always.to_raw(), 8);
        assert_eq!(BackendType::OpenGlEs.to_raw(), 7);
    }

    #[test]
    fn flags_match_the_native_bit_positions() {
        assert_eq!(BufferUsages::MAP_READ.bits(), 1);
        assert_eq!(BufferUsages::QUERY_RESOLVE.bits(), 512);
        assert_eq!(
            (BufferUsages::STORAGE | BufferUsages::COPY_SRC | BufferUsages::COPY_DST).bits(),
            0x8C
        );
        assert_eq!(TextureUsages::RENDER_ATTACHMENT.bits(), 16);
        assert_eq!(ShaderStages::COMPUTE.bits(), 4);
        assert_eq!(ColorWrites::default().bits(), 0xF);
        assert_eq!((MapMode::READ | MapMode::WRITE).bits(), 3);
    }

    #[test]
    fn vertex_format_sizes() {
        assert_eq!(VertexFormat::Uint8x2.size(), 2);
        assert_eq!(VertexFormat::Float32.size(), 4);
        assert_eq!(VertexFormat::Float16x4.size(), 8);
        assert_eq!(VertexFormat::Float32x3.size(), 12);
        assert_eq!(VertexFormat::Sint32x4.size(), 16);
    }

    #[test]
    fn unknown_feature_values_are_rejected_not_misread() {
        assert_eq!(FeatureName::from_raw(9), Some(FeatureName::IndirectFirstInstance));
        assert_eq!(FeatureName::from_raw(10), None);
        assert_eq!(FeatureName::from_raw(0x1000_0000), None);
    }
}
