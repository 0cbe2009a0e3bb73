//! Win32 snap preview surface
//!
//! A layered, click-through, topmost tool window that never takes focus.
//! Frames are painted with tiny-skia and pushed with `UpdateLayeredWindow`,
//! so there is no WM_PAINT handling and no flicker while the preview moves.

use std::ffi::c_void;

use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    AC_SRC_ALPHA, AC_SRC_OVER, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION,
    CreateCompatibleDC, CreateDIBSection, DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, HGDIOBJ,
    ReleaseDC, SelectObject,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, HWND_TOPMOST, RegisterClassW, SW_HIDE,
    SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SetWindowPos, ShowWindow,
    ULW_ALPHA, UpdateLayeredWindow, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE,
    WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::w;

use crate::domain::core::Rect;
use crate::ui::overlay::{OverlayBackend, OverlayError, OverlaySurface};
use crate::ui::renderer::{OverlayStyle, PreviewRenderer};

/// Creates layered preview windows
#[derive(Debug, Default)]
pub struct LayeredOverlayBackend;

impl OverlayBackend for LayeredOverlayBackend {
    fn create_surface(&self) -> Result<Box<dyn OverlaySurface>, OverlayError> {
        Ok(Box::new(LayeredSurface::new()?))
    }
}

struct LayeredSurface {
    hwnd: HWND,
    bounds: Rect,
    style: OverlayStyle,
    renderer: PreviewRenderer,
    visible: bool,
}

unsafe extern "system" fn preview_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

impl LayeredSurface {
    fn new() -> Result<Self, OverlayError> {
        let class_name = w!("BorderlessSnapPreview");
        let hinstance = unsafe { GetModuleHandleW(None) }
            .map_err(|_| OverlayError::WindowClassRegistrationFailed)?;

        let wc = WNDCLASSW {
            lpfnWndProc: Some(preview_window_proc),
            hInstance: hinstance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };

        // Zero here usually means the class already exists from an earlier
        // overlay; window creation below reports real failures.
        unsafe { RegisterClassW(&wc) };

        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_NOACTIVATE | WS_EX_TOOLWINDOW | WS_EX_TRANSPARENT,
                class_name,
                w!("Snap Preview"),
                WS_POPUP,
                0,
                0,
                1,
                1,
                None,
                None,
                hinstance,
                None,
            )
        };

        if hwnd.0 == 0 {
            return Err(OverlayError::WindowCreationFailed);
        }

        tracing::debug!(hwnd = hwnd.0, "created snap preview window");

        Ok(Self {
            hwnd,
            bounds: Rect::default(),
            style: OverlayStyle::default(),
            renderer: PreviewRenderer::new(),
            visible: false,
        })
    }

    fn redraw(&self) -> Result<(), OverlayError> {
        let width = self.bounds.w.round().max(1.0) as u32;
        let height = self.bounds.h.round().max(1.0) as u32;
        let pixmap = self.renderer.render(self.style, width, height)?;
        self.present(&pixmap)
    }

    /// Pushes a premultiplied frame to the layered window at `self.bounds`
    fn present(&self, pixmap: &tiny_skia::Pixmap) -> Result<(), OverlayError> {
        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;

        unsafe {
            let screen_dc = GetDC(HWND(0));
            if screen_dc.0 == 0 {
                return Err(OverlayError::DeviceContextFailed);
            }

            let memory_dc = CreateCompatibleDC(screen_dc);
            if memory_dc.0 == 0 {
                ReleaseDC(HWND(0), screen_dc);
                return Err(OverlayError::MemoryDeviceContextFailed);
            }

            let bitmap_info = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height,
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let mut pixel_ptr: *mut c_void = std::ptr::null_mut();
            let dib = match CreateDIBSection(
                memory_dc,
                &bitmap_info,
                DIB_RGB_COLORS,
                &mut pixel_ptr,
                None,
                0,
            ) {
                Ok(bitmap) if !pixel_ptr.is_null() => bitmap,
                Ok(bitmap) => {
                    DeleteObject(HGDIOBJ::from(bitmap));
                    DeleteDC(memory_dc);
                    ReleaseDC(HWND(0), screen_dc);
                    return Err(OverlayError::DibSectionCreationFailed);
                }
                Err(_) => {
                    DeleteDC(memory_dc);
                    ReleaseDC(HWND(0), screen_dc);
                    return Err(OverlayError::DibSectionCreationFailed);
                }
            };
            let dib_object: HGDIOBJ = dib.into();

            // tiny-skia is RGBA, GDI wants BGRA
            let src = pixmap.data();
            let dst = std::slice::from_raw_parts_mut(pixel_ptr as *mut u8, src.len());
            for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                out[0] = px[2];
                out[1] = px[1];
                out[2] = px[0];
                out[3] = px[3];
            }

            let old_bitmap = SelectObject(memory_dc, dib_object);
            if old_bitmap.0 == 0 {
                DeleteObject(dib_object);
                DeleteDC(memory_dc);
                ReleaseDC(HWND(0), screen_dc);
                return Err(OverlayError::BitmapSelectionFailed);
            }

            let size = SIZE {
                cx: width,
                cy: height,
            };
            let dst_point = POINT {
                x: self.bounds.x.round() as i32,
                y: self.bounds.y.round() as i32,
            };
            let src_point = POINT { x: 0, y: 0 };
            let blend = BLENDFUNCTION {
                BlendOp: AC_SRC_OVER as u8,
                BlendFlags: 0,
                SourceConstantAlpha: 255,
                AlphaFormat: AC_SRC_ALPHA as u8,
            };

            let update_result = UpdateLayeredWindow(
                self.hwnd,
                screen_dc,
                Some(&dst_point),
                Some(&size),
                memory_dc,
                Some(&src_point),
                COLORREF(0),
                Some(&blend),
                ULW_ALPHA,
            );

            SelectObject(memory_dc, old_bitmap);
            DeleteObject(dib_object);
            DeleteDC(memory_dc);
            ReleaseDC(HWND(0), screen_dc);

            update_result.map_err(|_| OverlayError::LayerUpdateFailed)
        }
    }
}

impl OverlaySurface for LayeredSurface {
    fn set_bounds(&mut self, bounds: Rect) -> Result<(), OverlayError> {
        self.bounds = bounds;
        if self.visible {
            self.redraw()?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: OverlayStyle) -> Result<(), OverlayError> {
        self.style = style;
        if self.visible {
            self.redraw()?;
        }
        Ok(())
    }

    fn show(&mut self) -> Result<(), OverlayError> {
        self.redraw()?;
        unsafe {
            ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
        self.visible = true;
        Ok(())
    }

    fn focus(&mut self) {
        let result = unsafe {
            SetWindowPos(
                self.hwnd,
                HWND_TOPMOST,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        };
        if let Err(err) = result {
            tracing::warn!(%err, "failed to raise snap preview");
        }
    }

    fn hide(&mut self) {
        unsafe {
            ShowWindow(self.hwnd, SW_HIDE);
        }
        self.visible = false;
    }
}

impl Drop for LayeredSurface {
    fn drop(&mut self) {
        unsafe {
            DestroyWindow(self.hwnd).ok();
        }
        tracing::debug!(hwnd = self.hwnd.0, "destroyed snap preview window");
    }
}
